use std::io::{self, BufRead, Write};

/// Line-oriented dialogue with the player over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Print a message from the game.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "Game: {text}")
    }

    /// Print a line as is.
    pub fn print(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Show `prompt` and read one trimmed line. `None` once input is exhausted.
    pub fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a yes/no reply, asking again on anything else.
    /// `None` when the player quits or input ends.
    pub fn ask_yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(reply) = self.ask_line(prompt)? else {
                return Ok(None);
            };
            match parse_reply(&reply) {
                Reply::Yes => return Ok(Some(true)),
                Reply::No => return Ok(Some(false)),
                Reply::Quit => return Ok(None),
                Reply::Unknown => self.say("Please answer y(es), n(o) or q(uit).")?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Yes,
    No,
    Quit,
    Unknown,
}

fn parse_reply(reply: &str) -> Reply {
    match reply.to_ascii_lowercase().as_str() {
        "y" | "yes" => Reply::Yes,
        "n" | "no" => Reply::No,
        "q" | "quit" | "exit" => Reply::Quit,
        _ => Reply::Unknown,
    }
}
