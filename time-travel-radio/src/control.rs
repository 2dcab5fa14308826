//! Interactive control loop
//!
//! Blocks on one line of input per prompt. An unknown decade or an
//! unrecognised choice is reported and the loop carries on; any other
//! failure, including running out of input, ends the loop with an error.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use decades_player::{DecadesPlayer, PlaybackService, PlayerError};
use tracing::{debug, warn};

pub const ACTION_PROMPT: &str = "What to change the (d)ecade or the (v)olume?";
pub const DECADE_PROMPT: &str = "Which decade?";
pub const VOLUME_PROMPT: &str = "What volume?";

/// Run the loop until an error ends it
pub fn run<S, R, W>(player: &DecadesPlayer<S>, input: &mut R, output: &mut W) -> Result<()>
where
    S: PlaybackService,
    R: BufRead,
    W: Write,
{
    loop {
        let action = prompt(input, output, ACTION_PROMPT)?;
        debug!(action = %action, "Control input");

        match action.as_str() {
            "d" => {
                let decade = prompt(input, output, DECADE_PROMPT)?;
                match player.play_music(&decade) {
                    Ok(()) => {}
                    Err(PlayerError::UnknownLabel(label)) => {
                        warn!("No playlist for decade '{}'", label);
                        writeln!(output, "Invalid decade")?;
                    }
                    Err(e) => return Err(e).context("Failed to change decade"),
                }
            }
            "v" => {
                let answer = prompt(input, output, VOLUME_PROMPT)?;
                let volume: i64 = answer
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid volume '{}'", answer))?;
                player
                    .change_volume(volume)
                    .context("Failed to change volume")?;
            }
            _ => writeln!(output, "Invalid choice")?,
        }
    }
}

/// Print `message` and read one line, without its line ending
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("End of input");
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
