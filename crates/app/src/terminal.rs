use services::{
    AdvancedSnapshot, AnswerFeedback, BeginnerSnapshot, QuizEvent, QuizIntent, QuizResult,
    QuizSession, QuizSnapshot,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Intent(QuizIntent),
    Help,
    Quit,
}

/// Map a typed line onto an action for the session shown in `snapshot`.
///
/// Numbers pick the listed option or word (one-based). Typing the word itself
/// works too, but only if it is one of the listed choices. `c` checks an advanced answer, `n` (or an empty line) continues
/// after feedback, `q` quits.
pub(crate) fn parse_input(line: &str, snapshot: &QuizSnapshot) -> Result<Input, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "?" | "h" | "help" => return Ok(Input::Help),
        _ => {}
    }

    let (choices, awaiting_advance) = match snapshot {
        QuizSnapshot::Beginner(view) => (&view.options, view.feedback.is_some()),
        QuizSnapshot::Advanced(view) => (&view.remaining, view.feedback.is_some()),
    };

    if awaiting_advance {
        return match trimmed {
            "" | "n" | "next" => Ok(Input::Intent(QuizIntent::Advance)),
            _ => Err("press enter to continue".to_owned()),
        };
    }
    if trimmed.is_empty() {
        return Err("type a number to answer".to_owned());
    }
    if matches!(snapshot, QuizSnapshot::Advanced(_)) && matches!(trimmed, "c" | "check") {
        return Ok(Input::Intent(QuizIntent::Evaluate));
    }

    let choice = match trimmed.parse::<usize>() {
        Ok(number) => number
            .checked_sub(1)
            .and_then(|idx| choices.get(idx))
            .cloned()
            .ok_or_else(|| format!("pick a number between 1 and {}", choices.len()))?,
        Err(_) if choices.iter().any(|choice| choice == trimmed) => trimmed.to_owned(),
        Err(_) => return Err(format!("`{trimmed}` is not one of the choices")),
    };

    Ok(Input::Intent(match snapshot {
        QuizSnapshot::Beginner(_) => QuizIntent::SelectOption(choice),
        QuizSnapshot::Advanced(_) => QuizIntent::SelectWord(choice),
    }))
}

pub(crate) fn render(snapshot: &QuizSnapshot) -> String {
    match snapshot {
        QuizSnapshot::Beginner(view) => render_beginner(view),
        QuizSnapshot::Advanced(view) => render_advanced(view),
    }
}

fn render_beginner(view: &BeginnerSnapshot) -> String {
    let mut out = format!(
        "\nQuestion {}/{}  (score {})\n",
        view.question_number, view.total_questions, view.score
    );
    if let Some(prompt) = &view.prompt {
        out.push_str(&format!("What is the meaning of \"{prompt}\"?\n"));
    }
    out.push_str(&numbered(&view.options));
    out
}

fn render_advanced(view: &AdvancedSnapshot) -> String {
    let mut out = format!(
        "\nSentence {}/{}  (score {})\n",
        view.question_number, view.total_questions, view.score
    );
    out.push_str(&format!("Translate: {}\n", view.prompt_words.join(" ")));
    out.push_str(&format!(
        "Your answer [{}/{}]: {}\n",
        view.selected.len(),
        view.required,
        view.selected.join(" ")
    ));
    out.push_str(&numbered(&view.remaining));
    out
}

fn numbered(choices: &[String]) -> String {
    choices
        .iter()
        .enumerate()
        .map(|(idx, choice)| format!("  {}. {choice}\n", idx + 1))
        .collect()
}

fn render_feedback(feedback: &AnswerFeedback) -> String {
    if feedback.correct {
        "Correct!\n".to_owned()
    } else {
        format!("Not quite. The answer was: {}\n", feedback.expected)
    }
}

fn render_result(result: &QuizResult) -> String {
    format!(
        "\nFinished: {}/{} correct ({:.0}%)\n",
        result.score,
        result.total,
        result.ratio() * 100.0
    )
}

const HELP: &str = "Type the number of an option (or the word itself). \
`c` checks a sentence, enter continues after feedback, `q` quits.\n";

/// Drive `session` from stdin until it finishes or the user quits.
///
/// Returns the final tally, or `None` if the user left early.
pub(crate) async fn play(
    session: &mut QuizSession,
) -> Result<Option<QuizResult>, Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(HELP.as_bytes()).await?;
    while !session.is_complete() {
        let snapshot = session.snapshot();
        if session.pending_feedback().is_none() {
            stdout.write_all(render(&snapshot).as_bytes()).await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed");
            return Ok(None);
        };
        let intent = match parse_input(&line, &snapshot) {
            Ok(Input::Intent(intent)) => intent,
            Ok(Input::Help) => {
                stdout.write_all(HELP.as_bytes()).await?;
                continue;
            }
            Ok(Input::Quit) => return Ok(None),
            Err(hint) => {
                stdout.write_all(format!("{hint}\n").as_bytes()).await?;
                continue;
            }
        };

        match session.dispatch(intent) {
            Ok(QuizEvent::Answered { feedback, .. }) => {
                stdout.write_all(render_feedback(&feedback).as_bytes()).await?;
                if session.pending_feedback().is_some() {
                    stdout.write_all(b"(press enter to continue)\n").await?;
                }
            }
            Ok(QuizEvent::WordSelected { .. } | QuizEvent::Advanced { .. }) => {}
            Err(err) if err.is_recoverable() => {
                stdout.write_all(format!("{err}\n").as_bytes()).await?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    let result = session.result();
    if let Some(result) = &result {
        stdout.write_all(render_result(result).as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(result)
}
