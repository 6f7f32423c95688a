//! Tutor — two-phase Q&A chatbot with a bounded conversation buffer.
//!
//! The dialogue is an explicit two-state machine. In `Ask`, any input is a
//! new question: the tutor answers it simply and ends with the sentinel
//! phrase asking whether the user wants more. In `MoreInfo`, the user's reply
//! is classified: affirmative answers get a deeper explanation of the same
//! question, negative answers reset the cycle, and anything else gets a fixed
//! re-prompt without touching the upstream API.
//!
//! A streaming response is fully drained before anything is appended to the
//! transcript; if the upstream call fails the session is left exactly as it
//! was before the turn.

use std::sync::Arc;
use studyhall_core::message::{Message, Transcript};
use studyhall_core::provider::{Provider, ProviderRequest};
use tracing::{debug, info};

/// The sentinel phrase the model is told to end its answers with.
pub const MORE_INFO_SENTINEL: &str = "DO YOU WANT MORE INFO";

/// Fixed reply when the user declines more info.
const RESET_REPLY: &str = "Okay! What question can I help you with next?";

/// Fixed re-prompt when the reply can't be classified.
const CLARIFY_REPLY: &str = "Please answer with 'yes' or 'no'. DO YOU WANT MORE INFO?";

/// The dialogue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueMode {
    /// Waiting for a new question.
    Ask,
    /// Waiting for a yes/no to the more-info offer.
    MoreInfo,
}

/// Classification of a user reply in `MoreInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    Affirmative,
    Negative,
    Other,
}

impl ReplyClass {
    /// Classify case-insensitively: `yes`/`y` affirm, `no`/`n` decline,
    /// everything else is unclassified.
    pub fn classify(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" => ReplyClass::Affirmative,
            "no" | "n" => ReplyClass::Negative,
            _ => ReplyClass::Other,
        }
    }
}

/// One interactive tutoring session: transcript, mode, and the question the
/// more-info offer refers to. Process lifetime only; nothing persists.
pub struct TutorSession {
    transcript: Transcript,
    mode: DialogueMode,
    last_question: Option<String>,
}

impl TutorSession {
    /// Start a fresh session whose transcript retains at most `buffer_cap`
    /// messages.
    pub fn new(buffer_cap: usize) -> Self {
        Self {
            transcript: Transcript::with_cap(buffer_cap),
            mode: DialogueMode::Ask,
            last_question: None,
        }
    }

    pub fn mode(&self) -> DialogueMode {
        self.mode
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

/// What a turn resolved to.
#[derive(Debug, Clone)]
pub struct TutorReply {
    /// The assistant text appended to the transcript.
    pub text: String,
    /// Whether the text came from the model (vs. a fixed reply).
    pub generated: bool,
}

/// The transition table: state × input class → next state, action.
enum TurnPlan {
    Generate {
        prompt: String,
        remember_question: Option<String>,
        next_mode: DialogueMode,
    },
    Canned {
        reply: &'static str,
        next_mode: DialogueMode,
    },
}

fn plan_turn(session: &TutorSession, input: &str) -> TurnPlan {
    match session.mode {
        DialogueMode::Ask => TurnPlan::Generate {
            prompt: answer_prompt(input),
            remember_question: Some(input.to_string()),
            next_mode: DialogueMode::MoreInfo,
        },
        DialogueMode::MoreInfo => match ReplyClass::classify(input) {
            ReplyClass::Affirmative => TurnPlan::Generate {
                prompt: deeper_prompt(session.last_question().unwrap_or_default()),
                remember_question: None,
                next_mode: DialogueMode::MoreInfo,
            },
            ReplyClass::Negative => TurnPlan::Canned {
                reply: RESET_REPLY,
                next_mode: DialogueMode::Ask,
            },
            ReplyClass::Other => TurnPlan::Canned {
                reply: CLARIFY_REPLY,
                next_mode: DialogueMode::MoreInfo,
            },
        },
    }
}

/// The simple-answer instruction for a new question.
fn answer_prompt(question: &str) -> String {
    format!(
        "You are a chatbot talking to a 10-year-old.\n\
         Answer the following question in simple words.\n\
         After the explanation, ask exactly: \"{MORE_INFO_SENTINEL}\".\n\
         Question: {question}"
    )
}

/// The deeper-explanation instruction for the remembered question.
fn deeper_prompt(question: &str) -> String {
    format!(
        "You already explained the answer to this question:\n{question}\n\n\
         Now, provide a deeper but still simple explanation suitable for a 10-year-old.\n\
         At the end, again ask: \"{MORE_INFO_SENTINEL}\"."
    )
}

/// Drives tutoring sessions through the configured provider.
pub struct Tutor {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl Tutor {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Process one user input.
    ///
    /// `on_delta` is invoked with each content fragment as it arrives (once,
    /// with the whole text, for fixed replies). The session is only mutated
    /// after the response is complete: a failed upstream call returns an
    /// error and leaves transcript, mode, and last question untouched.
    pub async fn take_turn(
        &self,
        session: &mut TutorSession,
        input: &str,
        mut on_delta: impl FnMut(&str) + Send,
    ) -> Result<TutorReply, studyhall_core::Error> {
        let plan = plan_turn(session, input);

        let reply = match plan {
            TurnPlan::Generate {
                prompt,
                remember_question,
                next_mode,
            } => {
                debug!(mode = ?session.mode, "Issuing generation request");

                // The assembled instruction is the entire request.
                let request = ProviderRequest::single(&self.model, prompt)
                    .with_temperature(self.temperature)
                    .streaming();

                let mut rx = self.provider.stream(request).await?;
                let mut text = String::new();

                // Drain the stream completely before committing the turn.
                while let Some(chunk) = rx.recv().await {
                    let chunk = chunk?;
                    if let Some(delta) = chunk.content {
                        on_delta(&delta);
                        text.push_str(&delta);
                    }
                    if chunk.done {
                        break;
                    }
                }

                info!(mode = ?session.mode, chars = text.len(), "Turn generated");

                session.transcript.push(Message::user(input));
                session.transcript.push(Message::assistant(&text));
                if let Some(question) = remember_question {
                    session.last_question = Some(question);
                }
                session.mode = next_mode;

                TutorReply {
                    text,
                    generated: true,
                }
            }
            TurnPlan::Canned { reply, next_mode } => {
                on_delta(reply);

                session.transcript.push(Message::user(input));
                session.transcript.push(Message::assistant(reply));
                session.mode = next_mode;

                TutorReply {
                    text: reply.to_string(),
                    generated: false,
                }
            }
        };

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockProvider;

    fn tutor_with(provider: Arc<SequentialMockProvider>) -> Tutor {
        Tutor::new(provider, "mock-model", 0.7)
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(ReplyClass::classify("yes"), ReplyClass::Affirmative);
        assert_eq!(ReplyClass::classify("YES"), ReplyClass::Affirmative);
        assert_eq!(ReplyClass::classify(" Y "), ReplyClass::Affirmative);
        assert_eq!(ReplyClass::classify("no"), ReplyClass::Negative);
        assert_eq!(ReplyClass::classify("N"), ReplyClass::Negative);
        assert_eq!(ReplyClass::classify("maybe"), ReplyClass::Other);
        assert_eq!(ReplyClass::classify(""), ReplyClass::Other);
    }

    #[tokio::test]
    async fn new_question_is_answered_with_sentinel_prompt() {
        let provider = Arc::new(SequentialMockProvider::single_text(
            "The sky is blue because of light scattering. DO YOU WANT MORE INFO",
        ));
        let tutor = tutor_with(provider.clone());
        let mut session = TutorSession::new(30);

        let reply = tutor
            .take_turn(&mut session, "Why is the sky blue?", |_| {})
            .await
            .unwrap();

        assert!(reply.generated);
        assert_eq!(session.mode(), DialogueMode::MoreInfo);
        assert_eq!(session.last_question(), Some("Why is the sky blue?"));
        assert_eq!(session.transcript().len(), 2);

        let sent = provider.last_request().unwrap();
        assert_eq!(sent.messages.len(), 1);
        assert!(sent.messages[0].content.contains("Why is the sky blue?"));
        assert!(sent.messages[0].content.contains(MORE_INFO_SENTINEL));
    }

    #[tokio::test]
    async fn affirmative_reply_requests_deeper_explanation() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            crate::test_helpers::make_text_response("Simple answer. DO YOU WANT MORE INFO"),
            crate::test_helpers::make_text_response("Deeper answer. DO YOU WANT MORE INFO"),
        ]));
        let tutor = tutor_with(provider.clone());
        let mut session = TutorSession::new(30);

        tutor
            .take_turn(&mut session, "What is gravity?", |_| {})
            .await
            .unwrap();
        let reply = tutor.take_turn(&mut session, "YES", |_| {}).await.unwrap();

        assert!(reply.generated);
        assert_eq!(session.mode(), DialogueMode::MoreInfo);
        assert_eq!(provider.call_count(), 2);

        // The deeper request references the remembered question
        let sent = provider.last_request().unwrap();
        assert!(sent.messages[0].content.contains("What is gravity?"));
        assert!(sent.messages[0].content.contains("deeper"));
    }

    #[tokio::test]
    async fn negative_reply_resets_without_api_call() {
        let provider = Arc::new(SequentialMockProvider::single_text(
            "Answer. DO YOU WANT MORE INFO",
        ));
        let tutor = tutor_with(provider.clone());
        let mut session = TutorSession::new(30);

        tutor
            .take_turn(&mut session, "What is rain?", |_| {})
            .await
            .unwrap();
        assert_eq!(provider.call_count(), 1);

        let reply = tutor.take_turn(&mut session, "n", |_| {}).await.unwrap();

        assert!(!reply.generated);
        assert_eq!(reply.text, "Okay! What question can I help you with next?");
        assert_eq!(session.mode(), DialogueMode::Ask);
        // No second upstream call was issued
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn unclassified_reply_reprompts_in_place() {
        let provider = Arc::new(SequentialMockProvider::single_text(
            "Answer. DO YOU WANT MORE INFO",
        ));
        let tutor = tutor_with(provider.clone());
        let mut session = TutorSession::new(30);

        tutor
            .take_turn(&mut session, "What is snow?", |_| {})
            .await
            .unwrap();
        let reply = tutor
            .take_turn(&mut session, "perhaps", |_| {})
            .await
            .unwrap();

        assert!(!reply.generated);
        assert_eq!(
            reply.text,
            "Please answer with 'yes' or 'no'. DO YOU WANT MORE INFO?"
        );
        assert_eq!(session.mode(), DialogueMode::MoreInfo);
        assert_eq!(session.last_question(), Some("What is snow?"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_turn_leaves_session_unchanged() {
        let provider = Arc::new(SequentialMockProvider::failing());
        let tutor = tutor_with(provider);
        let mut session = TutorSession::new(30);

        let result = tutor
            .take_turn(&mut session, "Why do birds fly?", |_| {})
            .await;

        assert!(result.is_err());
        assert!(session.transcript().is_empty());
        assert_eq!(session.mode(), DialogueMode::Ask);
        assert_eq!(session.last_question(), None);
    }

    #[tokio::test]
    async fn deltas_accumulate_to_reply_text() {
        let provider = Arc::new(SequentialMockProvider::single_text(
            "Because air scatters blue light. DO YOU WANT MORE INFO",
        ));
        let tutor = tutor_with(provider);
        let mut session = TutorSession::new(30);

        let mut streamed = String::new();
        let reply = tutor
            .take_turn(&mut session, "Why is the sky blue?", |delta| {
                streamed.push_str(delta);
            })
            .await
            .unwrap();

        assert_eq!(streamed, reply.text);
        assert_eq!(session.transcript().last().unwrap().content, reply.text);
    }

    #[tokio::test]
    async fn transcript_stays_within_cap_across_turns() {
        let responses: Vec<_> = (0..6)
            .map(|i| crate::test_helpers::make_text_response(&format!("Answer {i}. DO YOU WANT MORE INFO")))
            .collect();
        let provider = Arc::new(SequentialMockProvider::new(responses));
        let tutor = tutor_with(provider);
        let mut session = TutorSession::new(4);

        for i in 0..3 {
            tutor
                .take_turn(&mut session, &format!("Question {i}?"), |_| {})
                .await
                .unwrap();
            // Decline to reset back to Ask; canned replies also count as turns
            tutor.take_turn(&mut session, "no", |_| {}).await.unwrap();
            assert!(session.transcript().len() <= 4);
        }

        // The buffer holds only the most recent exchange
        assert_eq!(session.transcript().len(), 4);
        let contents: Vec<&str> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents[0], "Question 2?");
    }
}
