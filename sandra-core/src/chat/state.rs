use strum::{Display, IntoStaticStr};

use crate::ai::types::Message;

/// Status line shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Status {
    #[strum(serialize = "Sandra está lista.")]
    Ready,
    #[strum(serialize = "Pensando...")]
    Thinking,
    #[strum(serialize = "Escuchando...")]
    Listening,
    #[strum(serialize = "Buscando una recomendación...")]
    Searching,
    #[strum(serialize = "Recomendación de propiedad lista.")]
    RecommendationReady,
    #[strum(serialize = "Sandra está hablando...")]
    Speaking,
    #[strum(serialize = "Mensaje de Sandra (silenciado).")]
    Muted,
    #[strum(serialize = "No se pudo generar el audio.")]
    AudioUnavailable,
    #[strum(serialize = "Error al escuchar. Inténtalo de nuevo.")]
    ListenError,
    #[strum(serialize = "El reconocimiento de voz no está disponible.")]
    ListenUnavailable,
    #[strum(serialize = "Error.")]
    Error,
}

impl Status {
    /// Whether the assistant accepts new input in this status
    pub fn is_ready(&self) -> bool {
        !matches!(
            self,
            Status::Thinking | Status::Searching | Status::Listening
        )
    }

    pub fn message(&self) -> &'static str {
        self.into()
    }
}

/// Everything a conversation carries between turns. Lives for one session
/// and is never persisted.
#[derive(Debug, Clone)]
pub struct SessionState {
    history: Vec<Message>,
    pub is_speaking: bool,
    pub is_muted: bool,
    pub status: Status,
}

impl SessionState {
    /// Start a conversation whose first turn is the assistant's greeting.
    pub fn new(greeting: &str) -> Self {
        Self {
            history: vec![Message::model(greeting)],
            is_speaking: false,
            is_muted: false,
            status: Status::Ready,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn greeting(&self) -> Option<&str> {
        self.history.first().map(|m| m.text.as_str())
    }

    pub(crate) fn record_exchange(&mut self, user_text: &str, reply_text: &str) {
        self.history.push(Message::user(user_text));
        self.history.push(Message::model(reply_text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::MessageRole;

    #[test]
    fn test_new_state_starts_with_greeting() {
        let state = SessionState::new("Hola");

        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].role, MessageRole::Model);
        assert_eq!(state.greeting(), Some("Hola"));
        assert_eq!(state.status, Status::Ready);
        assert!(!state.is_speaking);
        assert!(!state.is_muted);
    }

    #[test]
    fn test_record_exchange_appends_in_order() {
        let mut state = SessionState::new("Hola");
        state.record_exchange("¿Tenéis pisos?", "Sí, varios.");

        let roles: Vec<MessageRole> = state.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::Model, MessageRole::User, MessageRole::Model]
        );
        assert_eq!(state.history()[2].text, "Sí, varios.");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Ready.to_string(), "Sandra está lista.");
        assert_eq!(Status::Thinking.message(), "Pensando...");
        assert!(!Status::Searching.is_ready());
        assert!(Status::Error.is_ready());
    }

    #[test]
    fn test_listening_status_messages() {
        assert_eq!(Status::Listening.message(), "Escuchando...");
        assert_eq!(
            Status::ListenError.to_string(),
            "Error al escuchar. Inténtalo de nuevo."
        );
        assert_eq!(
            Status::RecommendationReady.message(),
            "Recomendación de propiedad lista."
        );
        assert!(!Status::Listening.is_ready());
        assert!(Status::ListenError.is_ready());
        assert!(Status::ListenUnavailable.is_ready());
    }
}
