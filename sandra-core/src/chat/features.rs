//! One-shot business helpers offered next to free chat

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const RECOMMENDATION_PROMPT: &str = "Recomiéndame una propiedad de lujo en Valencia. \
Necesito un nombre, una descripción breve, el número de habitaciones, y un enlace para reservar. \
La respuesta debe ser una propiedad ficticia si no tienes acceso a una base de datos real.";

const DEFAULT_TRANSLATION_TARGET: &str = "inglés";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRequest {
    RecommendProperty,
    WhatsAppMessage { details: String },
    PropertyDescription { details: String },
    TravelItinerary { details: String },
    DetailedQuote { details: String },
    WelcomeGuide { details: String },
    Translate { text: String, target_language: String },
}

impl FeatureRequest {
    /// Build a translation request from `"<language>: <text>"`, or translate
    /// the whole input to English when no language prefix is given.
    pub fn translate(input: &str) -> Self {
        match input.split_once(':') {
            Some((language, text)) if !language.trim().is_empty() && !text.trim().is_empty() => {
                Self::Translate {
                    text: text.trim().to_string(),
                    target_language: language.trim().to_string(),
                }
            }
            _ => Self::Translate {
                text: input.trim().to_string(),
                target_language: DEFAULT_TRANSLATION_TARGET.to_string(),
            },
        }
    }

    /// The line echoed into the chat as if the user had typed it
    pub fn user_line(&self) -> &'static str {
        match self {
            Self::RecommendProperty => "Quiero una recomendación de propiedad.",
            Self::WhatsAppMessage { .. } => "Ayúdame a redactar un mensaje para WhatsApp.",
            Self::PropertyDescription { .. } => "Generar una descripción de propiedad.",
            Self::TravelItinerary { .. } => "Generar un itinerario de viaje.",
            Self::DetailedQuote { .. } => "Generar un presupuesto detallado.",
            Self::WelcomeGuide { .. } => "Generar una guía de bienvenida.",
            Self::Translate { .. } => "Quiero traducir un texto.",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::RecommendProperty => RECOMMENDATION_PROMPT.to_string(),
            Self::WhatsAppMessage { details } => format!(
                "Redacta un mensaje de WhatsApp breve, cordial y profesional de parte de \
                 HouseRentValencia con esta información: {details}"
            ),
            Self::PropertyDescription { details } => format!(
                "Escribe una descripción atractiva para el anuncio de una propiedad de alquiler \
                 vacacional de lujo en Valencia con estos datos: {details}"
            ),
            Self::TravelItinerary { details } => format!(
                "Crea un itinerario de viaje por Valencia, día por día, para un huésped de \
                 HouseRentValencia con estas preferencias: {details}"
            ),
            Self::DetailedQuote { details } => format!(
                "Genera un presupuesto detallado en una tabla Markdown para una estancia con \
                 HouseRentValencia según estos datos: {details}. Incluye alojamiento, limpieza, \
                 tasas y el total."
            ),
            Self::WelcomeGuide { details } => format!(
                "Redacta una guía de bienvenida para los huéspedes de esta propiedad, con \
                 check-in, normas de la casa, wifi y recomendaciones cercanas: {details}"
            ),
            Self::Translate {
                text,
                target_language,
            } => format!(
                "Traduce el siguiente texto al {target_language}. Devuelve solo la traducción.\n\n{text}"
            ),
        }
    }

    /// Schema for structured output, when the feature expects JSON
    pub fn response_schema(&self) -> Option<Value> {
        match self {
            Self::RecommendProperty => Some(PropertyRecommendation::schema()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecommendation {
    pub property_name: String,
    pub description: String,
    pub bedrooms: f64,
    pub booking_link: String,
}

impl PropertyRecommendation {
    pub fn schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "property_name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "bedrooms": { "type": "NUMBER" },
                "booking_link": { "type": "STRING" }
            }
        })
    }

    pub fn to_markdown(&self) -> String {
        format!(
            "### {}\n\n**Habitaciones:** {}\n\n{}\n\n[Ver y Reservar]({})",
            self.property_name, self.bedrooms, self.description, self.booking_link
        )
    }
}

/// Result of a feature request as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureReply {
    pub user_line: &'static str,
    /// Markdown
    pub text: String,
    pub succeeded: bool,
    pub recommendation: Option<PropertyRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_parses_language_prefix() {
        assert_eq!(
            FeatureRequest::translate("francés: Bienvenidos a Valencia"),
            FeatureRequest::Translate {
                text: "Bienvenidos a Valencia".to_string(),
                target_language: "francés".to_string(),
            }
        );
        assert_eq!(
            FeatureRequest::translate("Bienvenidos"),
            FeatureRequest::Translate {
                text: "Bienvenidos".to_string(),
                target_language: "inglés".to_string(),
            }
        );
    }

    #[test]
    fn test_only_recommendation_is_structured() {
        assert!(FeatureRequest::RecommendProperty.response_schema().is_some());
        let quote = FeatureRequest::DetailedQuote {
            details: "4 noches".to_string(),
        };
        assert!(quote.response_schema().is_none());
        assert!(quote.prompt().contains("4 noches"));
    }

    #[test]
    fn test_recommendation_markdown_card() {
        let rec: PropertyRecommendation = serde_json::from_str(
            r#"{"property_name":"Villa Turia","description":"Ático con vistas.","bedrooms":3,"booking_link":"https://example.com/villa"}"#,
        )
        .unwrap();

        assert_eq!(
            rec.to_markdown(),
            "### Villa Turia\n\n**Habitaciones:** 3\n\nÁtico con vistas.\n\n[Ver y Reservar](https://example.com/villa)"
        );
    }
}
