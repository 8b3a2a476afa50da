use tui_textarea::Input;

use super::AgentOutcome;

#[derive(Debug)]
pub enum Event {
    AgentReply(AgentOutcome),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardEnter,
    KeyboardPaste(String),
    KeyboardTab,
    KeyboardBackTab,
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
