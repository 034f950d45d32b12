//! Error types for event publishing.

use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use thiserror::Error;

/// Errors that can occur while publishing an event.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The event could not be encoded; a programming error, never retried
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The broker could not be reached or did not acknowledge in time
    #[error("Broker unavailable: {0}")]
    BrokerUnavailable(String),

    /// The broker rejected the record
    #[error("Publish failure: {0}")]
    PublishFailure(String),

    #[error("Topic creation error: {0}")]
    TopicCreation(String),
}

impl PublishError {
    /// Whether the failure is on the transport side rather than in our data.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PublishError::BrokerUnavailable(_) | PublishError::PublishFailure(_)
        )
    }
}

impl From<KafkaError> for PublishError {
    fn from(err: KafkaError) -> Self {
        match err.rdkafka_error_code() {
            Some(
                RDKafkaErrorCode::AllBrokersDown
                | RDKafkaErrorCode::BrokerTransportFailure
                | RDKafkaErrorCode::MessageTimedOut
                | RDKafkaErrorCode::RequestTimedOut,
            ) => PublishError::BrokerUnavailable(err.to_string()),
            _ => PublishError::PublishFailure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_codes_map_to_unavailable() {
        let err = KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut);
        assert!(matches!(
            PublishError::from(err),
            PublishError::BrokerUnavailable(_)
        ));

        let err = KafkaError::MessageProduction(RDKafkaErrorCode::AllBrokersDown);
        assert!(matches!(
            PublishError::from(err),
            PublishError::BrokerUnavailable(_)
        ));
    }

    #[test]
    fn test_other_codes_map_to_failure() {
        let err = KafkaError::MessageProduction(RDKafkaErrorCode::MessageSizeTooLarge);
        let mapped = PublishError::from(err);
        assert!(matches!(mapped, PublishError::PublishFailure(_)));
        assert!(mapped.is_transient());
    }

    #[test]
    fn test_serialization_is_not_transient() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!PublishError::from(json_err).is_transient());
    }
}
