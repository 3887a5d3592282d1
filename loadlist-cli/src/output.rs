//! Rendering of store state for the terminal

use clap::ValueEnum;

use libloadlist::{AppState, ItemsView, StateChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Final state, as shown after all steps ran
pub fn render_state(state: &AppState, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(state),
        OutputFormat::Text => Ok(state_text(state)),
    }
}

/// One published commit, for `--watch`
pub fn render_change(change: &StateChange, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(change),
        OutputFormat::Text => Ok(format!(
            "#{} {} -> {}",
            change.revision,
            change.action.name(),
            change.state.items.phase()
        )),
    }
}

fn state_text(state: &AppState) -> String {
    match state.view() {
        ItemsView::Spinner => format!("[{}]", state.items.phase()),
        ItemsView::Error(message) => format!("[failed] {}", message),
        ItemsView::List { items, refreshing } => {
            let mut out = format!("[{}] {} items", state.items.phase(), items.len());
            if refreshing {
                out.push_str(" (refreshing)");
            }
            for item in items {
                out.push_str("\n  ");
                out.push_str(&item.name);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libloadlist::{Action, ErrorInfo, Item, Loadable};

    #[test]
    fn test_text_for_loaded_list() {
        let state = AppState::with_items(vec![Item::new("Foo"), Item::new("Bar")]);
        assert_eq!(
            render_state(&state, OutputFormat::Text).unwrap(),
            "[loaded] 2 items\n  Foo\n  Bar"
        );
    }

    #[test]
    fn test_text_for_refreshing_list() {
        let state = AppState {
            items: Loadable::Loading {
                last: Some(vec![Item::new("Foo")]),
            },
            ..AppState::default()
        };
        assert_eq!(
            render_state(&state, OutputFormat::Text).unwrap(),
            "[loading] 1 items (refreshing)\n  Foo"
        );
    }

    #[test]
    fn test_text_for_spinner_and_failure() {
        assert_eq!(
            render_state(&AppState::new(), OutputFormat::Text).unwrap(),
            "[not_requested]"
        );

        let failed = AppState {
            items: Loadable::Failed(ErrorInfo::new("offline")),
            ..AppState::default()
        };
        assert_eq!(
            render_state(&failed, OutputFormat::Text).unwrap(),
            "[failed] offline"
        );
    }

    #[test]
    fn test_json_state() {
        let state = AppState::with_items(vec![Item::new("Foo")]);
        let json: serde_json::Value =
            serde_json::from_str(&render_state(&state, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["items"]["phase"], "loaded");
        assert_eq!(json["items"]["data"][0]["name"], "Foo");
    }

    #[test]
    fn test_change_text() {
        let change = StateChange {
            revision: 4,
            action: Action::RepositoryLoad,
            state: AppState::new(),
        };
        assert_eq!(
            render_change(&change, OutputFormat::Text).unwrap(),
            "#4 repository_load -> not_requested"
        );
        assert!(!render_change(&change, OutputFormat::Json)
            .unwrap()
            .contains('\n'));
    }
}
