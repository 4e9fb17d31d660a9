//! Blocking prompts shown outside of play: the difficulty menu and the final report.

use std::io;

use tracing::info;

use crate::game::GameSummary;
use crate::speed::Difficulty;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// CTRL+C
    Interrupt,
    Other,
}

/// Blocking input plus a text screen, used by the menus.
pub trait Prompt {
    /// Replaces the screen with `lines`.
    fn show(&mut self, lines: &[&str]) -> io::Result<()>;
    /// Waits for the next key press.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Asks for a difficulty until one is confirmed. `None` means the player
/// pressed CTRL+C.
pub fn choose_difficulty<P: Prompt>(prompt: &mut P) -> io::Result<Option<Difficulty>> {
    let mut lines = vec!["Choose difficulty:".to_string()];
    lines.extend(
        Difficulty::ALL
            .iter()
            .map(|d| format!("{} - {}", d.key().to_ascii_uppercase(), d)),
    );
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

    loop {
        prompt.show(&lines)?;

        let difficulty = match prompt.read_key()? {
            Key::Interrupt => return Ok(None),
            Key::Char(c) => match Difficulty::from_key(c) {
                Some(d) => d,
                None => continue,
            },
            Key::Other => continue,
        };

        let question = format!("Confirm choice {}? (y/n)", difficulty.key().to_ascii_uppercase());
        prompt.show(&[question.as_str()])?;

        match prompt.read_key()? {
            Key::Interrupt => return Ok(None),
            Key::Char('y') => {
                info!(%difficulty, "difficulty chosen");
                return Ok(Some(difficulty));
            }
            _ => {}
        }
    }
}

/// Food eaten per 100 moves, undefined before the first move.
pub fn rating(score: u32, moves: u32) -> Option<f64> {
    if moves == 0 {
        None
    } else {
        Some(score as f64 / moves as f64 * 100.0)
    }
}

pub fn stats_lines(summary: &GameSummary) -> Vec<String> {
    let rating = match rating(summary.score, summary.moves) {
        Some(r) => format!("{:.2}", r),
        None => "n/a".to_string(),
    };

    vec![
        format!("Score: {}", summary.score),
        format!("Number of moves: {}", summary.moves),
        format!("Rating: {}", rating),
    ]
}

/// End-of-game screens: optional stats, then a goodbye waiting for any key.
pub fn report<P: Prompt>(prompt: &mut P, summary: &GameSummary) -> io::Result<()> {
    let banner = if summary.won {
        "YOU WON!! The board is full. Do you wish to see your game stats? (y/n)"
    } else {
        "GAME OVER!! Do you wish to see your game stats? (y/n)"
    };

    let mut lines = loop {
        prompt.show(&[banner])?;
        match prompt.read_key()? {
            Key::Char('y') => break stats_lines(summary),
            Key::Char('n') => break vec![],
            Key::Interrupt => return Ok(()),
            _ => {}
        }
    };

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("Goodbye and better luck next time!!".to_string());
    lines.push("(press any key to exit)".to_string());

    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    prompt.show(&lines)?;
    prompt.read_key()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedPrompt {
        keys: VecDeque<Key>,
        screens: Vec<Vec<String>>,
    }

    impl ScriptedPrompt {
        fn new(keys: &[Key]) -> Self {
            ScriptedPrompt { keys: keys.iter().copied().collect(), screens: vec![] }
        }

        fn last_screen(&self) -> &[String] {
            self.screens.last().map(Vec::as_slice).unwrap_or(&[])
        }
    }

    impl Prompt for ScriptedPrompt {
        fn show(&mut self, lines: &[&str]) -> io::Result<()> {
            self.screens.push(lines.iter().map(|l| l.to_string()).collect());
            Ok(())
        }

        fn read_key(&mut self) -> io::Result<Key> {
            self.keys
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    #[test]
    fn confirmed_choice_is_returned() {
        let mut prompt = ScriptedPrompt::new(&[Key::Char('h'), Key::Char('y')]);
        assert_eq!(choose_difficulty(&mut prompt).unwrap(), Some(Difficulty::Hard));
        assert_eq!(prompt.last_screen(), ["Confirm choice H? (y/n)"]);
        assert_eq!(prompt.screens[0].len(), 6);
        assert_eq!(prompt.screens[0][5], "S - Increase as you score");
    }

    #[test]
    fn unknown_keys_and_refusals_loop_back() {
        let keys = [Key::Char('x'), Key::Other, Key::Char('e'), Key::Char('n'), Key::Char('s'), Key::Char('y')];
        let mut prompt = ScriptedPrompt::new(&keys);
        assert_eq!(choose_difficulty(&mut prompt).unwrap(), Some(Difficulty::Adaptive));
        assert_eq!(prompt.screens.len(), 6);
    }

    #[test]
    fn interrupt_leaves_the_menu() {
        let mut prompt = ScriptedPrompt::new(&[Key::Char('m'), Key::Interrupt]);
        assert_eq!(choose_difficulty(&mut prompt).unwrap(), None);
    }

    #[test]
    fn rating_needs_a_move() {
        assert_eq!(rating(3, 0), None);
        assert_eq!(rating(3, 4), Some(75.0));
        assert_eq!(rating(0, 9), Some(0.0));
    }

    #[test]
    fn report_shows_stats_on_yes() {
        let summary = GameSummary { score: 1, moves: 3, won: false };
        let mut prompt = ScriptedPrompt::new(&[Key::Char('q'), Key::Char('y'), Key::Other]);
        report(&mut prompt, &summary).unwrap();

        assert_eq!(prompt.screens.len(), 3);
        assert!(prompt.screens[0][0].starts_with("GAME OVER!!"));
        assert_eq!(prompt.last_screen()[..3], ["Score: 1", "Number of moves: 3", "Rating: 33.33"]);
        assert_eq!(prompt.last_screen().last().map(String::as_str), Some("(press any key to exit)"));
    }

    #[test]
    fn report_skips_stats_on_no() {
        let summary = GameSummary { score: 0, moves: 0, won: false };
        let mut prompt = ScriptedPrompt::new(&[Key::Char('n'), Key::Char('z')]);
        report(&mut prompt, &summary).unwrap();
        assert_eq!(prompt.last_screen().len(), 2);
        assert!(prompt.last_screen()[0].starts_with("Goodbye"));
    }

    #[test]
    fn stats_without_moves_have_no_rating() {
        let lines = stats_lines(&GameSummary { score: 0, moves: 0, won: false });
        assert_eq!(lines[2], "Rating: n/a");
    }
}
