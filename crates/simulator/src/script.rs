//! Scripted input.
//!
//! One character per step: `>` clockwise, `<` counter-clockwise, `.`
//! Enter, `^` raises the nozzle by one layer. Whitespace is ignored.

use platform::EncoderEvent;

/// Layer height used by `^`.
pub const LAYER_HEIGHT_MM: f32 = 0.2;

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Feed an encoder event
    Input(EncoderEvent),
    /// Raise Z by one layer
    NextLayer,
}

/// Error for a character outside the script alphabet.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unexpected {found:?} at position {position} in script")]
pub struct ScriptError {
    /// Offending character
    pub found: char,
    /// Character index
    pub position: usize,
}

/// Parse a script into steps.
pub fn parse(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, c)| match c {
            '>' => Ok(Step::Input(EncoderEvent::Clockwise)),
            '<' => Ok(Step::Input(EncoderEvent::CounterClockwise)),
            '.' => Ok(Step::Input(EncoderEvent::Enter)),
            '^' => Ok(Step::NextLayer),
            found => Err(ScriptError { found, position }),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let steps = parse("> < .^").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Input(EncoderEvent::Clockwise),
                Step::Input(EncoderEvent::CounterClockwise),
                Step::Input(EncoderEvent::Enter),
                Step::NextLayer,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            parse(">x"),
            Err(ScriptError {
                found: 'x',
                position: 1
            })
        );
    }

    #[test]
    fn test_demo_script_parses() {
        assert!(!parse(crate::config::DEMO_SCRIPT).unwrap().is_empty());
    }
}
