pub mod features;
pub mod session;
pub mod state;

pub use features::{FeatureReply, FeatureRequest, PropertyRecommendation};
pub use session::{
    synthesize_speech, HeardReply, Reply, Session, SessionOptions, SpeechDelivery,
};
pub use state::{SessionState, Status};
