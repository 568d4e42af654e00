//! Line-based styled terminal I/O
//!
//! The game talks to the player through one reader and one writer, both
//! injectable so tests can run a whole session over in-memory buffers.
//! Styling is a small palette mapped onto terminal colors.

use crossterm::style::{style, Color, Stylize};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// The text palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Unstyled output (logs, summaries)
    Plain,
    /// Scene descriptions and character speech
    Narration,
    /// The opening mission text
    Briefing,
    /// Good news: correct passcode, victory
    Success,
    /// Dead ends: repeat visits, exhausted characters
    Warning,
    /// Bad news: invalid input, timeout, defeat
    Alert,
    /// A clue being revealed or reviewed
    Clue,
    /// Input prompts
    Prompt,
}

impl Style {
    fn color(self) -> Option<Color> {
        match self {
            Style::Plain => None,
            Style::Narration => Some(Color::White),
            Style::Briefing => Some(Color::Cyan),
            Style::Success => Some(Color::Green),
            Style::Warning => Some(Color::Yellow),
            Style::Alert => Some(Color::Red),
            Style::Clue => Some(Color::Blue),
            Style::Prompt => Some(Color::Grey),
        }
    }
}

/// Terminal front end over an arbitrary reader/writer pair
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    out: W,
    color: bool,
}

impl Console<BufReader<Stdin>, Stdout> {
    /// The real thing: stdin and stdout
    pub fn stdio(color: bool) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, color: bool) -> Self {
        Self { input, out, color }
    }

    /// Print one styled line
    pub fn print(&mut self, text: &str, text_style: Style) -> io::Result<()> {
        match text_style.color() {
            Some(color) if self.color => {
                writeln!(self.out, "{}", style(text).with(color))
            }
            _ => writeln!(self.out, "{text}"),
        }
    }

    pub fn print_blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Print a prompt (no newline), flush, and read one line.
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        match Style::Prompt.color() {
            Some(color) if self.color => write!(self.out, "{} ", style(msg).with(color))?,
            _ => write!(self.out, "{msg} ")?,
        }
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Consume the console and hand back the writer (test inspection)
    pub fn into_writer(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    #[test]
    fn prompt_trims_and_reads_in_order() {
        let mut console = test_console("  first \nsecond\n");
        assert_eq!(console.prompt(">").unwrap(), Some("first".to_string()));
        assert_eq!(console.prompt(">").unwrap(), Some("second".to_string()));
        assert_eq!(console.prompt(">").unwrap(), None);
    }

    #[test]
    fn uncolored_output_is_plain_text() {
        let mut console = test_console("");
        console.print("You open the door.", Style::Narration).unwrap();

        let out = String::from_utf8(console.into_writer()).unwrap();
        assert_eq!(out, "You open the door.\n");
    }

    #[test]
    fn colored_output_carries_escape_codes() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new(), true);
        console.print("Correct passcode", Style::Success).unwrap();

        let out = String::from_utf8(console.into_writer()).unwrap();
        assert!(out.contains("\x1b["), "expected ANSI styling in {out:?}");
        assert!(out.contains("Correct passcode"));
    }
}
