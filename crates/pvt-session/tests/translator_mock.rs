//! Add-verb requests as seen by the translation service

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::function;
use pvt_gateway::{GatewayError, InMemoryRowStore, TranslationRequest, TranslationService};
use pvt_session::{Collaborators, EditingSession, SessionConfig};
use pvt_test_utils::{current_schema, signed_in, ScriptedExamples};
use std::sync::Arc;

mock! {
    Translator {}

    #[async_trait]
    impl TranslationService for Translator {
        async fn translate(&self, request: TranslationRequest) -> Result<String, GatewayError>;
    }
}

#[tokio::test]
async fn one_lowercased_request_per_column() {
    let mut translator = MockTranslator::new();
    translator
        .expect_translate()
        .with(function(|r: &TranslationRequest| {
            r.verb == "Look" && r.preposition == r.preposition.to_lowercase()
        }))
        .times(20)
        .returning(|r| match r.preposition.as_str() {
            "up with" => Ok("  Aguantar ".to_string()),
            "into" => Err(GatewayError::Status {
                service: "translate",
                status: 500,
                body: "boom".into(),
            }),
            _ => Ok(String::new()),
        });

    let session = EditingSession::open(
        &signed_in(),
        Collaborators::new(
            Arc::new(InMemoryRowStore::new()),
            Arc::new(translator),
            Arc::new(ScriptedExamples::returning("")),
        ),
        current_schema(),
        SessionConfig::new().with_seed_new_users(false),
    )
    .await
    .unwrap();

    assert_eq!(session.add_verb(" Look ").await.unwrap(), 1);

    let row = session.row("Look").unwrap();
    let up_with = session.schema().position("Up with").unwrap();
    assert_eq!(row.meanings[up_with], "Aguantar");
    assert_eq!(row.filled(), 1);
    session.close();
}
