//! The human-in-the-loop selection policy.
//!
//! Presents the legal actions as a numbered menu on an injected [`Console`]
//! and retries until the answer parses and lands in range. The console seam
//! is what keeps this testable without a terminal.

use std::fmt;

use log::{info, warn};

use crate::action::Action;
use crate::console::{Console, InputEvent, StdConsole};
use crate::style::GameStyle;
use crate::strategy::SelectActionStrategy;

/// Asks a human to pick the action.
///
/// Menu entries are numbered from 1. Anything that isn't a number in range
/// draws a complaint and a fresh prompt; the loop ends only on a valid
/// choice or a closed input stream (which reads as quitting).
pub struct Interactive {
    console: Box<dyn Console>,
}

impl Interactive {
    /// Interactive policy talking to the real terminal.
    pub fn new() -> Interactive {
        Interactive::with_console(Box::new(StdConsole::new()))
    }

    /// Interactive policy talking to the supplied console.
    pub fn with_console(console: Box<dyn Console>) -> Interactive {
        Interactive { console }
    }
}

impl Default for Interactive {
    fn default() -> Interactive {
        Interactive::new()
    }
}

impl fmt::Debug for Interactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactive").finish_non_exhaustive()
    }
}

impl SelectActionStrategy for Interactive {
    fn select(&mut self, actor: &str, actions: &[Action]) -> Action {
        if actions.is_empty() {
            return Action::Rest;
        }
        loop {
            self.console
                .say(&format!("\nWhat will {} do?", actor.actor_style()));
            for (i, action) in actions.iter().enumerate() {
                self.console.say(&format!("  {}) {}", i + 1, action.description()));
            }

            let event = match self.console.read_line(&"> ".prompt_style().to_string()) {
                Ok(event) => event,
                Err(err) => {
                    warn!("failed to read player input: {err}");
                    self.console
                        .say(&"Failed to read input. Try again.".error_style().to_string());
                    continue;
                },
            };

            let line = match event {
                InputEvent::Line(line) => line,
                InputEvent::Eof => {
                    info!("input stream closed; treating as quit");
                    return actions
                        .iter()
                        .find(|action| action.is_quit())
                        .cloned()
                        .unwrap_or(Action::Rest);
                },
                InputEvent::Interrupted => {
                    self.console.say("Choice canceled.");
                    continue;
                },
            };

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=actions.len()).contains(&choice) => {
                    return actions[choice - 1].clone();
                },
                Ok(choice) => self.console.say(
                    &format!("{choice} is not on the menu. Pick 1 through {}.", actions.len())
                        .error_style()
                        .to_string(),
                ),
                Err(_) => self.console.say(
                    &format!(
                        "\"{}\"? Give me a number between 1 and {}.",
                        line.trim(),
                        actions.len()
                    )
                    .error_style()
                    .to_string(),
                ),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    /// Console fed from a script, capturing everything said to it. The
    /// spoken log is shared so tests can inspect it after the strategy has
    /// taken ownership of the console.
    #[derive(Default)]
    struct ScriptedConsole {
        lines: VecDeque<String>,
        spoken: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedConsole {
        fn with_lines(lines: &[&str]) -> ScriptedConsole {
            ScriptedConsole {
                lines: lines.iter().map(|line| (*line).to_string()).collect(),
                spoken: Rc::default(),
            }
        }

        fn spoken_log(&self) -> Rc<RefCell<Vec<String>>> {
            Rc::clone(&self.spoken)
        }
    }

    impl Console for ScriptedConsole {
        fn say(&mut self, line: &str) {
            self.spoken.borrow_mut().push(line.to_string());
        }

        fn read_line(&mut self, _prompt: &str) -> io::Result<InputEvent> {
            Ok(self
                .lines
                .pop_front()
                .map_or(InputEvent::Eof, InputEvent::Line))
        }
    }

    fn menu() -> Vec<Action> {
        vec![
            Action::Move { direction: "north".into() },
            Action::Investigate,
            Action::Rest,
            Action::Quit,
        ]
    }

    fn select_with(lines: &[&str], actions: &[Action]) -> Action {
        let mut strategy = Interactive::with_console(Box::new(ScriptedConsole::with_lines(lines)));
        strategy.select("Tester", actions)
    }

    #[test]
    fn valid_choice_is_one_based() {
        assert_eq!(select_with(&["2"], &menu()), Action::Investigate);
        assert_eq!(
            select_with(&["1"], &menu()),
            Action::Move { direction: "north".into() }
        );
    }

    #[test]
    fn retries_until_input_parses() {
        assert_eq!(select_with(&["banana", "", "3"], &menu()), Action::Rest);
    }

    #[test]
    fn retries_on_out_of_range_choice() {
        assert_eq!(select_with(&["0", "99", "4"], &menu()), Action::Quit);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(select_with(&["  2  "], &menu()), Action::Investigate);
    }

    #[test]
    fn eof_quits_when_quit_is_on_the_menu() {
        assert_eq!(select_with(&[], &menu()), Action::Quit);
    }

    #[test]
    fn eof_rests_when_quit_is_absent() {
        let actions = vec![Action::Move { direction: "north".into() }, Action::Rest];
        assert_eq!(select_with(&[], &actions), Action::Rest);
    }

    #[test]
    fn empty_menu_rests_without_prompting() {
        let mut console = ScriptedConsole::default();
        console.lines.push_back("1".into());
        let mut strategy = Interactive::with_console(Box::new(console));
        assert_eq!(strategy.select("Tester", &[]), Action::Rest);
    }

    #[test]
    fn menu_lists_every_action_with_its_number() {
        let console = ScriptedConsole::with_lines(&["1"]);
        let spoken = console.spoken_log();
        let mut strategy = Interactive::with_console(Box::new(console));
        let actions = menu();
        strategy.select("Tester", &actions);

        let spoken = spoken.borrow();
        for (i, action) in actions.iter().enumerate() {
            let entry = format!("{}) {}", i + 1, action.description());
            assert!(
                spoken.iter().any(|line| line.contains(&entry)),
                "menu is missing '{entry}'"
            );
        }
    }

    #[test]
    fn bad_input_draws_a_diagnostic() {
        let console = ScriptedConsole::with_lines(&["elephant", "1"]);
        let spoken = console.spoken_log();
        let mut strategy = Interactive::with_console(Box::new(console));
        strategy.select("Tester", &menu());

        let spoken = spoken.borrow();
        assert!(spoken.iter().any(|line| line.contains("elephant")));
    }

    #[test]
    fn interactive_reports_itself_interactive() {
        let strategy = Interactive::with_console(Box::new(ScriptedConsole::default()));
        assert!(strategy.is_interactive());
    }

    #[test]
    fn interrupt_reprompts_instead_of_choosing() {
        struct InterruptOnce {
            interrupted: bool,
        }
        impl Console for InterruptOnce {
            fn say(&mut self, _line: &str) {}
            fn read_line(&mut self, _prompt: &str) -> io::Result<InputEvent> {
                if self.interrupted {
                    Ok(InputEvent::Line("2".into()))
                } else {
                    self.interrupted = true;
                    Ok(InputEvent::Interrupted)
                }
            }
        }
        let mut strategy =
            Interactive::with_console(Box::new(InterruptOnce { interrupted: false }));
        assert_eq!(strategy.select("Tester", &menu()), Action::Investigate);
    }
}
