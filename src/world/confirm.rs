use super::*;
use std::io::{BufRead, IsTerminal, Write};

/// Where confirmation answers come from.
pub(crate) trait Prompt {
    fn is_interactive(&self) -> bool;
    fn ask(&mut self, question: &str) -> std::io::Result<String>;
}

/// Prompt bound to the process's stdin/stdout.
pub(crate) struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn ask(&mut self, question: &str) -> std::io::Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Proceed,
    Cancelled,
}

/// Gate for destructive actions. `--yes` skips the question; without it a terminal is
/// required and only a literal "yes" goes through.
pub(crate) fn confirm(
    force_yes: bool,
    summary: &str,
    prompt: &mut dyn Prompt,
) -> Result<Decision, WorldError> {
    if force_yes {
        debug!("confirmation skipped (--yes): {summary}");
        return Ok(Decision::Proceed);
    }
    if !prompt.is_interactive() {
        return Err(WorldError::ConfirmationRequired);
    }
    let answer = prompt
        .ask(&format!("{summary}\nType \"yes\" to continue: "))
        .map_err(WorldError::Prompt)?;
    if answer.trim().eq_ignore_ascii_case("yes") {
        Ok(Decision::Proceed)
    } else {
        Ok(Decision::Cancelled)
    }
}

/// Canned answers for driving the gate in tests.
#[cfg(test)]
pub(crate) struct ScriptedPrompt {
    pub interactive: bool,
    pub answers: Vec<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            interactive: true,
            answers: answers.iter().rev().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }

    pub fn detached() -> Self {
        Self {
            interactive: false,
            answers: Vec::new(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&mut self, question: &str) -> std::io::Result<String> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_yes_never_prompts() {
        let mut prompt = ScriptedPrompt::detached();
        assert_eq!(
            confirm(true, "Delete 3 entities.", &mut prompt).expect("approved"),
            Decision::Proceed
        );
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn non_interactive_without_yes_is_refused() {
        let mut prompt = ScriptedPrompt::detached();
        let err = confirm(false, "Delete 3 entities.", &mut prompt).expect_err("needs terminal");
        assert!(matches!(err, WorldError::ConfirmationRequired));
    }

    #[test]
    fn only_literal_yes_proceeds() {
        for (answer, expected) in [
            ("yes\n", Decision::Proceed),
            ("  YES \n", Decision::Proceed),
            ("Yes", Decision::Proceed),
            ("y\n", Decision::Cancelled),
            ("\n", Decision::Cancelled),
            ("", Decision::Cancelled),
            ("yes please\n", Decision::Cancelled),
        ] {
            let mut prompt = ScriptedPrompt::answering(&[answer]);
            assert_eq!(
                confirm(false, "Delete 1 entities.", &mut prompt).expect("answered"),
                expected,
                "answer {answer:?}"
            );
            assert_eq!(
                prompt.asked,
                vec!["Delete 1 entities.\nType \"yes\" to continue: ".to_string()]
            );
        }
    }
}
