//! Runs an `Effect` against the collaborators and turns the outcome into the
//! completion `Action` that `update()` expects.

use log::warn;

use crate::backend::collaborator::{AnswerRequest, Answerer, Scraper};
use crate::core::action::{Action, AnswerFailure, Effect, LoadFailure};

/// Execute an I/O effect. Returns `None` for effects that need no I/O.
pub async fn execute<S, A>(effect: Effect, scraper: &S, answerer: &A) -> Option<Action>
where
    S: Scraper + ?Sized,
    A: Answerer + ?Sized,
{
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::Scrape { generation, url } => {
            let result = scraper.scrape(&url).await.map_err(|e| {
                warn!("Scrape of {} failed: {}", url, e);
                LoadFailure(e.to_string())
            });
            Some(Action::ContextLoaded { generation, result })
        }
        Effect::Ask {
            generation,
            history,
            message,
            context,
        } => {
            let request = AnswerRequest {
                history: &history,
                message: &message,
                context: &context,
            };
            let result = answerer.answer(request).await.map_err(|e| {
                warn!("Answer request failed: {}", e);
                AnswerFailure(e.to_string())
            });
            Some(Action::AnswerReceived { generation, result })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::core::state::{App, ChatTurn};
    use crate::test_support::{FailingBackend, ScriptedBackend};

    #[test]
    fn no_io_effects_yield_nothing() {
        let backend = ScriptedBackend::new("md", "reply");
        assert!(tokio_test::block_on(execute(Effect::None, &backend, &backend)).is_none());
        assert!(tokio_test::block_on(execute(Effect::Quit, &backend, &backend)).is_none());
    }

    #[test]
    fn load_then_ask_round_trip() {
        let backend = ScriptedBackend::new("Rule text...", "Eight weeks.");
        let mut app = App::new();

        let effect = update(&mut app, Action::LoadUrl("https://univ.edu/regs".into()));
        let done = tokio_test::block_on(execute(effect, &backend, &backend)).unwrap();
        update(&mut app, done);
        assert_eq!(app.context.text.as_deref(), Some("Rule text..."));
        assert!(app.context.loaded);

        let effect = update(&mut app, Action::Send("What is the minimum duration?".into()));
        assert_eq!(app.conversation.turns.len(), 1);
        let done = tokio_test::block_on(execute(effect, &backend, &backend)).unwrap();
        update(&mut app, done);

        assert_eq!(
            app.conversation.turns,
            vec![
                ChatTurn::user("What is the minimum duration?"),
                ChatTurn::assistant("Eight weeks."),
            ]
        );
        assert!(!app.conversation.busy);

        let asked = backend.last_question().unwrap();
        assert_eq!(asked.message, "What is the minimum duration?");
        assert_eq!(asked.context, "Rule text...");
        assert!(asked.history.is_empty());
    }

    #[test]
    fn failures_map_to_completion_errors() {
        let backend = FailingBackend;
        let action = tokio_test::block_on(execute(
            Effect::Scrape {
                generation: 3,
                url: "bad-url".into(),
            },
            &backend,
            &backend,
        ));
        assert!(matches!(
            action,
            Some(Action::ContextLoaded { generation: 3, result: Err(_) })
        ));

        let action = tokio_test::block_on(execute(
            Effect::Ask {
                generation: 5,
                history: vec![],
                message: "q".into(),
                context: "c".into(),
            },
            &backend,
            &backend,
        ));
        assert!(matches!(
            action,
            Some(Action::AnswerReceived { generation: 5, result: Err(_) })
        ));
    }
}
