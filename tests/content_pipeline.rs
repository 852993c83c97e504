use synoid_shorts::agent::content_requester::{ContentRequester, GenerationError, LanguageModel};
use synoid_shorts::agent::prompt::PromptTemplate;
use synoid_shorts::agent::record::{ContentRecord, SHORTS_TAG};
use synoid_shorts::agent::response_parser::parse_response;
use synoid_shorts::agent::themes::{Theme, ThemeCatalog};

struct CannedModel(Result<String, u16>);

impl LanguageModel for CannedModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        assert!(prompt.contains("Discipline"), "theme missing from prompt");
        match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(GenerationError::Api {
                status: *status,
                body: "boom".to_string(),
            }),
        }
    }
}

fn requester(model: CannedModel) -> ContentRequester<CannedModel> {
    ContentRequester::new(model, ThemeCatalog::standard(), PromptTemplate::ruthless_mentor())
}

#[tokio::test]
async fn test_discipline_end_to_end() {
    let text = "HOOK: Wait for it...\nBODY: Work hard in silence.\nTITLE: Test\nDESCRIPTION: Line1\nLine2\nTAGS: a,b";
    let theme = Theme::new("Discipline", "WEALTH");
    let record = requester(CannedModel(Ok(text.to_string())))
        .request(&theme)
        .await
        .unwrap();

    assert_eq!(
        record,
        ContentRecord {
            hook: "Wait for it...".to_string(),
            body: "Work hard in silence.".to_string(),
            title: "Test".to_string(),
            description: "Line1\nLine2".to_string(),
            tags: vec!["a".to_string(), "b".to_string(), SHORTS_TAG.to_string()],
        }
    );
}

#[tokio::test]
async fn test_failed_call_uses_full_fallback() {
    let theme = Theme::new("Discipline", "WEALTH");
    let record = requester(CannedModel(Err(500)))
        .request_or_fallback(&theme)
        .await;
    assert_eq!(record, ContentRecord::fallback());
}

#[test]
fn test_field_order_does_not_matter() {
    let forward = "HOOK: h\nBODY: b\nTITLE: t\nDESCRIPTION: d\nTAGS: x";
    let shuffled = "TAGS: x\nDESCRIPTION: d\nTITLE: t\nBODY: b\nHOOK: h";
    let seed = ContentRecord::seeded("Focus");
    assert_eq!(parse_response(forward, seed.clone()), parse_response(shuffled, seed));
}

#[test]
fn test_partial_response_keeps_defaults() {
    let seed = ContentRecord::seeded("Focus");
    let record = parse_response("BODY: only the body\nnoise line", seed.clone());

    assert_eq!(record.body, "only the body");
    assert_eq!(record.hook, seed.hook);
    assert_eq!(record.title, seed.title);
    assert_eq!(record.description, seed.description);
    assert_eq!(record.tags, seed.tags);
    assert!(record.description.contains("#Focus"));
}
