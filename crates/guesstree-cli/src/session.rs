use std::io::{BufRead, Write};

use anyhow::Result;
use guesstree_core::{DecisionTree, GameError, GameEvent, GameOutcome, KnowledgeStore};
use tracing::warn;

use crate::console::Console;

const LEARNED_MESSAGE: &str = "Got it! The new item is in the knowledge base.";
const MISSING_FIELDS_MESSAGE: &str = "Please fill in both the item and the question!";

/// How a single round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundEnd {
    Finished,
    Quit,
}

/// Play rounds until the player declines another one or input runs out.
pub fn play<S, R, W>(tree: &mut DecisionTree<S>, console: &mut Console<R, W>) -> Result<()>
where
    S: KnowledgeStore,
    R: BufRead,
    W: Write,
{
    loop {
        if play_round(tree, console)? == RoundEnd::Quit {
            break;
        }
        if console.ask_yes_no("Play again? (y/n)")? != Some(true) {
            break;
        }
    }
    console.say("Bye!")?;
    Ok(())
}

/// Print the knowledge base dump.
pub fn show<S, R, W>(tree: &DecisionTree<S>, console: &mut Console<R, W>) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in tree.dump_tree() {
        console.print(&line)?;
    }
    Ok(())
}

fn play_round<S, R, W>(tree: &mut DecisionTree<S>, console: &mut Console<R, W>) -> Result<RoundEnd>
where
    S: KnowledgeStore,
    R: BufRead,
    W: Write,
{
    let mut event = tree.start_game()?;
    loop {
        match event {
            GameEvent::Question(text) => {
                let Some(answer) = console.ask_yes_no(&format!("Game: {text} (y/n)"))? else {
                    return Ok(RoundEnd::Quit);
                };
                event = tree.submit_answer(answer)?;
            }
            GameEvent::GameOver {
                outcome: GameOutcome::Guessed,
                message,
            } => {
                console.say(&message)?;
                return Ok(RoundEnd::Finished);
            }
            GameEvent::GameOver {
                outcome: GameOutcome::GaveUp,
                message,
            } => {
                console.say(&message)?;
                return teach(tree, console);
            }
            GameEvent::KnowledgeBase(lines) => {
                for line in lines {
                    console.print(&line)?;
                }
                return Ok(RoundEnd::Finished);
            }
        }
    }
}

fn teach<S, R, W>(tree: &mut DecisionTree<S>, console: &mut Console<R, W>) -> Result<RoundEnd>
where
    S: KnowledgeStore,
    R: BufRead,
    W: Write,
{
    let old_item = match tree.cursor() {
        Some(cursor) => tree.node(cursor)?.text().to_string(),
        None => return Ok(RoundEnd::Finished),
    };

    loop {
        let Some(item) = console.ask_line("You were thinking of:")? else {
            return Ok(RoundEnd::Quit);
        };
        let Some(question) = console.ask_line(&format!(
            "A yes/no question that tells {} apart from {old_item}:",
            if item.is_empty() { "it" } else { item.as_str() }
        ))?
        else {
            return Ok(RoundEnd::Quit);
        };
        let Some(answer) = console.ask_yes_no("And the answer for your item is (y/n)")? else {
            return Ok(RoundEnd::Quit);
        };

        match tree.learn(&item, &question, answer) {
            Ok(()) => {
                console.say(LEARNED_MESSAGE)?;
                return Ok(RoundEnd::Finished);
            }
            Err(GameError::EmptyInput { .. }) => console.say(MISSING_FIELDS_MESSAGE)?,
            Err(err @ GameError::Persistence(_)) => {
                warn!(error = %err, "knowledge base not saved");
                console.say(&format!("Learned it for this session, but {err}"))?;
                return Ok(RoundEnd::Finished);
            }
            Err(err) => return Err(err.into()),
        }
    }
}
