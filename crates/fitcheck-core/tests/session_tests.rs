use fitcheck_core::constants::notices;
use fitcheck_core::tools::{SearchProvider, ToolResult};
use fitcheck_core::*;
use std::sync::{Arc, Mutex};

/// Mock completion service that records every request it receives.
struct MockLlm {
    replies: Mutex<Vec<Result<String, String>>>,
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockLlm {
    /// Replies are handed out in order.
    fn new(replies: Vec<Result<&str, &str>>) -> Self {
        let mut replies: Vec<Result<String, String>> = replies
            .into_iter()
            .map(|r| r.map(String::from).map_err(String::from))
            .collect();
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlm {
    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse, FitError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok("Mock response".to_string()));
        match next {
            Ok(text) => Ok(LlmResponse {
                message: Message::assistant(text),
                usage: Some(Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                }),
            }),
            Err(e) => Err(FitError::Llm(e)),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

struct FailingSearch;

#[async_trait::async_trait]
impl SearchProvider for FailingSearch {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _query: &str) -> ToolResult<Vec<String>> {
        Err(FitError::tool("web_search", "timed out"))
    }
}

/// Logger that records rows, or fails every append.
struct RecordingLogger {
    rows: Arc<Mutex<Vec<InteractionRow>>>,
    fail: bool,
}

#[async_trait::async_trait]
impl InteractionLogger for RecordingLogger {
    async fn append(&self, row: &InteractionRow) -> Result<(), FitError> {
        if self.fail {
            return Err(FitError::Logger("quota exceeded".into()));
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}

fn session_with(llm: MockLlm) -> Session {
    Session::new(Box::new(llm), "You are an advisor.")
        .with_identity(Identity::new("Ada", "ada@district.org"))
}

#[tokio::test]
async fn test_turn_appends_user_then_assistant() {
    let mut session = session_with(MockLlm::new(vec![Ok("Sounds like a fit.")]));

    let outcome = session
        .submit("Automate attendance emails", AugmentRequest::default())
        .await
        .unwrap();

    assert_eq!(outcome.reply, "Sounds like a fit.");
    assert_eq!(outcome.usage, Some(Usage { input_tokens: 10, output_tokens: 5 }));
    assert_eq!(session.state(), SessionState::Idle);

    let messages = session.conversation().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], Message::system("You are an advisor."));
    assert_eq!(
        messages[1],
        Message::user("User: Ada, Email: ada@district.org\n\nAutomate attendance emails")
    );
    assert_eq!(messages[2], Message::assistant("Sounds like a fit."));
}

#[tokio::test]
async fn test_each_turn_grows_conversation_by_two() {
    let mut session = session_with(MockLlm::new(vec![Ok("a1"), Ok("a2"), Ok("a3")]));

    for (i, input) in ["one", "two", "three"].iter().enumerate() {
        let before = session.conversation().len();
        session.submit(input, AugmentRequest::default()).await.unwrap();
        assert_eq!(session.conversation().len(), before + 2);
        assert_eq!(session.conversation().turns(), i + 1);
        assert_eq!(session.conversation().messages()[0].role, Role::System);
    }
}

#[tokio::test]
async fn test_full_history_is_sent_each_turn() {
    let llm = MockLlm::new(vec![Ok("a1"), Ok("a2")]);
    let calls = llm.calls.clone();
    let mut session = session_with(llm);

    session.submit("first", AugmentRequest::default()).await.unwrap();
    session.submit("second", AugmentRequest::default()).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[1].len(), 4);
    assert_eq!(calls[1][0].role, Role::System);
    assert_eq!(calls[1][2], Message::assistant("a1"));
}

#[tokio::test]
async fn test_wrong_access_code_blocks_everything() {
    let llm = MockLlm::new(vec![Ok("never")]);
    let calls = llm.calls.clone();
    let mut session = session_with(llm).with_gate(AccessGate::Code("open-sesame".into()));
    session.set_access_code("guess");

    let result = session.submit("hello", AugmentRequest::default()).await;

    assert!(matches!(result, Err(FitError::AccessDenied)));
    assert_eq!(session.conversation().len(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_access_code_blocks_everything() {
    let llm = MockLlm::new(vec![Ok("never")]);
    let calls = llm.calls.clone();
    let mut session = session_with(llm).with_gate(AccessGate::Locked);
    session.set_access_code("anything");

    let result = session.submit("hello", AugmentRequest::default()).await;

    assert!(matches!(result, Err(FitError::AccessDenied)));
    assert!(session.conversation().visible().is_empty());
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_correct_access_code_allows_turn() {
    let mut session = session_with(MockLlm::new(vec![Ok("welcome")]))
        .with_gate(AccessGate::Code("open-sesame".into()));
    assert!(!session.is_unlocked());

    session.set_access_code("open-sesame");
    assert!(session.is_unlocked());

    let outcome = session.submit("hello", AugmentRequest::default()).await.unwrap();
    assert_eq!(outcome.reply, "welcome");
}

#[tokio::test]
async fn test_blank_input_is_rejected_without_mutation() {
    let llm = MockLlm::new(vec![]);
    let calls = llm.calls.clone();
    let mut session = session_with(llm);

    let result = session.submit("  \n ", AugmentRequest::default()).await;

    assert!(matches!(result, Err(FitError::EmptyInput)));
    assert_eq!(session.conversation().len(), 1);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_still_completes_turn() {
    let llm = MockLlm::new(vec![Ok("Here is my advice.")]);
    let calls = llm.calls.clone();
    let mut session =
        session_with(llm).with_tools(ToolPipeline::new().with_search(Box::new(FailingSearch)));

    let request = AugmentRequest {
        search_query: Some("classroom scheduling".into()),
        ..AugmentRequest::default()
    };
    let outcome = session.submit("Scheduling help", request).await.unwrap();

    assert_eq!(outcome.reply, "Here is my advice.");
    let user = &session.conversation().messages()[1];
    assert_eq!(
        user.content,
        format!(
            "User: Ada, Email: ada@district.org\n\nScheduling help\n\n{}",
            notices::SEARCH_FAILED
        )
    );
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_fragment_lands_in_user_message() {
    let mut session = session_with(MockLlm::new(vec![Ok("ok")]));
    let body = "x".repeat(2000);

    let request = AugmentRequest {
        upload: Some(FileUpload::new("rubric.txt", body.into_bytes())),
        ..AugmentRequest::default()
    };
    session.submit("Review this rubric", request).await.unwrap();

    let content = &session.conversation().messages()[1].content;
    let expected_tail = format!("Uploaded file 'rubric.txt' (excerpt):\n{}", "x".repeat(1000));
    assert!(content.ends_with(&expected_tail));
    assert!(!content.contains(&"x".repeat(1001)));
}

#[tokio::test]
async fn test_completion_failure_keeps_user_message() {
    let llm = MockLlm::new(vec![Ok("a1"), Err("503 Service Unavailable")]);
    let mut session = session_with(llm);

    session.submit("first", AugmentRequest::default()).await.unwrap();
    let before = session.conversation().len();

    let result = session.submit("second", AugmentRequest::default()).await;

    assert!(matches!(result, Err(FitError::Llm(_))));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.conversation().len(), before + 1);
    assert_eq!(
        session.conversation().last_message(),
        Some(&Message::user("User: Ada, Email: ada@district.org\n\nsecond"))
    );
    assert_eq!(session.conversation().turns(), 1);
}

#[tokio::test]
async fn test_failed_turn_is_sent_with_next_submission() {
    let llm = MockLlm::new(vec![Err("timeout"), Ok("recovered")]);
    let calls = llm.calls.clone();
    let mut session = session_with(llm);

    assert!(session.submit("first", AugmentRequest::default()).await.is_err());
    session.submit("second", AugmentRequest::default()).await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[1].len(), 3);
    assert_eq!(calls[1][1].role, Role::User);
    assert_eq!(calls[1][2].role, Role::User);
    assert_eq!(session.conversation().len(), 4);
}

#[tokio::test]
async fn test_logger_receives_raw_input() {
    let rows = Arc::new(Mutex::new(Vec::new()));
    let logger = RecordingLogger {
        rows: rows.clone(),
        fail: false,
    };
    let mut session = session_with(MockLlm::new(vec![Ok("ok")]))
        .with_tools(ToolPipeline::new().with_search(Box::new(FailingSearch)))
        .with_logger(Box::new(logger));

    let request = AugmentRequest {
        search_query: Some("q".into()),
        ..AugmentRequest::default()
    };
    session.submit("Chatbot for enrollment", request).await.unwrap();

    let rows = rows.lock().unwrap();
    assert_eq!(
        *rows,
        vec![InteractionRow {
            name: "Ada".into(),
            email: "ada@district.org".into(),
            input: "Chatbot for enrollment".into(),
        }]
    );
}

#[tokio::test]
async fn test_logger_failure_propagates_after_turn_recorded() {
    let logger = RecordingLogger {
        rows: Arc::new(Mutex::new(Vec::new())),
        fail: true,
    };
    let mut session = session_with(MockLlm::new(vec![Ok("ok")])).with_logger(Box::new(logger));

    let result = session.submit("hello", AugmentRequest::default()).await;

    assert!(matches!(result, Err(FitError::Logger(_))));
    assert_eq!(session.conversation().len(), 3);
}

#[tokio::test]
async fn test_identity_changes_apply_to_next_turn() {
    let mut session = session_with(MockLlm::new(vec![Ok("a1"), Ok("a2")]));

    session.submit("first", AugmentRequest::default()).await.unwrap();
    session.identity_mut().name = "Grace".into();
    session.submit("second", AugmentRequest::default()).await.unwrap();

    let messages = session.conversation().messages();
    assert!(messages[1].content.starts_with("User: Ada,"));
    assert!(messages[3].content.starts_with("User: Grace, Email: ada@district.org"));
}
