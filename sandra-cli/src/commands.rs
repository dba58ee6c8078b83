use sandra_core::FeatureRequest;
use std::path::PathBuf;

pub const HELP: &str = "\
Comandos:
  /recommend              Recomendar una propiedad
  /whatsapp <datos>       Redactar un mensaje de WhatsApp
  /description <datos>    Generar una descripción de propiedad
  /itinerary <datos>      Generar un itinerario de viaje
  /quote <datos>          Generar un presupuesto detallado
  /welcome <datos>        Generar una guía de bienvenida
  /translate [idioma:] <texto>
  /listen <archivo.wav>   Enviar una grabación de voz
  /mute                   Activar o desactivar la voz
  /voices                 Listar voces disponibles
  /help                   Mostrar esta ayuda
  /quit                   Salir";

#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Free text sent to the assistant
    Say(String),
    Feature(FeatureRequest),
    /// Transcribe a recorded WAV file and answer it
    Listen(PathBuf),
    ToggleMute,
    Voices,
    Help,
    Quit,
    /// A feature command was given without the text it needs
    MissingDetails(&'static str),
    Unknown(String),
}

pub fn parse_command(input: &str) -> CliCommand {
    let input = input.trim();
    if !input.starts_with('/') {
        return CliCommand::Say(input.to_string());
    }

    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };

    let with_details = |command: &'static str, build: fn(String) -> FeatureRequest| {
        if rest.is_empty() {
            CliCommand::MissingDetails(command)
        } else {
            CliCommand::Feature(build(rest.to_string()))
        }
    };

    match name {
        "/recommend" => CliCommand::Feature(FeatureRequest::RecommendProperty),
        "/whatsapp" => with_details("/whatsapp", |details| FeatureRequest::WhatsAppMessage {
            details,
        }),
        "/description" => with_details("/description", |details| {
            FeatureRequest::PropertyDescription { details }
        }),
        "/itinerary" => with_details("/itinerary", |details| FeatureRequest::TravelItinerary {
            details,
        }),
        "/quote" => with_details("/quote", |details| FeatureRequest::DetailedQuote { details }),
        "/welcome" => with_details("/welcome", |details| FeatureRequest::WelcomeGuide { details }),
        "/translate" => with_details("/translate", |text| FeatureRequest::translate(&text)),
        "/listen" if rest.is_empty() => CliCommand::MissingDetails("/listen"),
        "/listen" => CliCommand::Listen(PathBuf::from(rest)),
        "/mute" => CliCommand::ToggleMute,
        "/voices" => CliCommand::Voices,
        "/help" => CliCommand::Help,
        "/exit" | "/quit" => CliCommand::Quit,
        other => CliCommand::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(
            parse_command("  Hola Sandra "),
            CliCommand::Say("Hola Sandra".to_string())
        );
    }

    #[test]
    fn test_feature_commands() {
        assert_eq!(
            parse_command("/recommend"),
            CliCommand::Feature(FeatureRequest::RecommendProperty)
        );
        assert_eq!(
            parse_command("/quote 2 adultos, 4 noches"),
            CliCommand::Feature(FeatureRequest::DetailedQuote {
                details: "2 adultos, 4 noches".to_string()
            })
        );
        assert_eq!(
            parse_command("/translate alemán: Buenas noches"),
            CliCommand::Feature(FeatureRequest::Translate {
                text: "Buenas noches".to_string(),
                target_language: "alemán".to_string(),
            })
        );
    }

    #[test]
    fn test_feature_without_details() {
        assert_eq!(
            parse_command("/whatsapp"),
            CliCommand::MissingDetails("/whatsapp")
        );
    }

    #[test]
    fn test_listen_takes_a_path() {
        assert_eq!(
            parse_command("/listen grabaciones/pregunta 1.wav"),
            CliCommand::Listen(PathBuf::from("grabaciones/pregunta 1.wav"))
        );
        assert_eq!(
            parse_command("/listen"),
            CliCommand::MissingDetails("/listen")
        );
    }

    #[test]
    fn test_local_commands() {
        assert_eq!(parse_command("/mute"), CliCommand::ToggleMute);
        assert_eq!(parse_command("/exit"), CliCommand::Quit);
        assert_eq!(
            parse_command("/dance"),
            CliCommand::Unknown("/dance".to_string())
        );
    }
}
