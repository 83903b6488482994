use crate::{Action, Direction, RobotInterface};
use anyhow::{Context, Result, bail};
use std::io::{BufRead, BufReader, Stdin, Stdout, Write, stdin, stdout};

/// Client for the mms micromouse simulator's line protocol: commands go
/// out on the writer, replies come back on the reader. Generic over the
/// endpoints so tests can drive it with in-memory buffers.
pub struct MmsClient<R, W> {
    reader: R,
    writer: W,
    height: usize,
}

impl MmsClient<BufReader<Stdin>, Stdout> {
    /// Client over process stdio, the channel the simulator owns. Keep
    /// human output on stderr or it will be read as commands.
    pub fn stdio(height: usize) -> Self {
        Self::new(BufReader::new(stdin()), stdout(), height)
    }
}

impl<R: BufRead, W: Write> MmsClient<R, W> {
    pub fn new(reader: R, writer: W, height: usize) -> Self {
        Self {
            reader,
            writer,
            height,
        }
    }

    fn send(&mut self, command: &str) -> Result<()> {
        writeln!(self.writer, "{command}").with_context(|| format!("sending {command:?}"))?;
        self.writer.flush().context("flushing command")
    }

    fn request(&mut self, command: &str) -> Result<String> {
        self.send(command)?;
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .with_context(|| format!("reading the reply to {command:?}"))?;
        if read == 0 {
            bail!("simulator closed the stream after {command:?}");
        }
        Ok(line.trim().to_string())
    }

    fn request_bool(&mut self, command: &str) -> Result<bool> {
        match self.request(command)?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => bail!("unexpected reply {other:?} to {command:?}"),
        }
    }

    fn request_ack(&mut self, command: &str) -> Result<()> {
        match self.request(command)?.as_str() {
            "ack" => Ok(()),
            other => bail!("simulator rejected {command:?}: {other}"),
        }
    }

    pub fn maze_width(&mut self) -> Result<usize> {
        self.request("mazeWidth")?.parse().context("parsing mazeWidth")
    }

    pub fn maze_height(&mut self) -> Result<usize> {
        self.request("mazeHeight")?
            .parse()
            .context("parsing mazeHeight")
    }

    /// Physically execute one planned action. `Idle` sends nothing.
    pub fn execute(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Forward => self.request_ack("moveForward"),
            Action::Left => self.request_ack("turnLeft"),
            Action::Right => self.request_ack("turnRight"),
            Action::Idle => Ok(()),
        }
    }

    // mms counts y up from the south wall; rows count down from the north.
    fn to_y(&self, row: usize) -> usize {
        self.height.saturating_sub(1).saturating_sub(row)
    }

    fn wall_letter(dir: Direction) -> char {
        match dir {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        }
    }
}

impl<R: BufRead, W: Write> RobotInterface for MmsClient<R, W> {
    fn wall_front(&mut self) -> Result<bool> {
        self.request_bool("wallFront")
    }

    fn wall_left(&mut self) -> Result<bool> {
        self.request_bool("wallLeft")
    }

    fn wall_right(&mut self) -> Result<bool> {
        self.request_bool("wallRight")
    }

    fn set_wall(&mut self, row: usize, col: usize, dir: Direction) -> Result<()> {
        let command = format!(
            "setWall {col} {} {}",
            self.to_y(row),
            Self::wall_letter(dir)
        );
        self.send(&command)
    }

    fn set_text(&mut self, row: usize, col: usize, text: &str) -> Result<()> {
        let command = format!("setText {col} {} {text}", self.to_y(row));
        self.send(&command)
    }

    fn clear_text(&mut self, row: usize, col: usize) -> Result<()> {
        let command = format!("clearText {col} {}", self.to_y(row));
        self.send(&command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(replies: &str) -> MmsClient<Cursor<String>, Vec<u8>> {
        MmsClient::new(Cursor::new(replies.to_string()), Vec::new(), 16)
    }

    fn sent(client: &MmsClient<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(client.writer.clone()).unwrap()
    }

    #[test]
    fn test_wall_queries() {
        let mut client = scripted("true\nfalse\ntrue\n");
        assert!(client.wall_front().unwrap());
        assert!(!client.wall_left().unwrap());
        assert!(client.wall_right().unwrap());
        assert_eq!(sent(&client), "wallFront\nwallLeft\nwallRight\n");
    }

    #[test]
    fn test_handshake() {
        let mut client = scripted("16\n16\n");
        assert_eq!(client.maze_width().unwrap(), 16);
        assert_eq!(client.maze_height().unwrap(), 16);
        assert_eq!(sent(&client), "mazeWidth\nmazeHeight\n");
    }

    #[test]
    fn test_execute_acknowledged() {
        let mut client = scripted("ack\nack\nack\n");
        client.execute(Action::Forward).unwrap();
        client.execute(Action::Left).unwrap();
        client.execute(Action::Right).unwrap();
        client.execute(Action::Idle).unwrap();
        assert_eq!(sent(&client), "moveForward\nturnLeft\nturnRight\n");
    }

    #[test]
    fn test_crash_reply_is_an_error() {
        let mut client = scripted("crash\n");
        assert!(client.execute(Action::Forward).is_err());
    }

    #[test]
    fn test_bad_reply_is_an_error() {
        let mut client = scripted("maybe\n");
        assert!(client.wall_front().is_err());
    }

    #[test]
    fn test_closed_stream_is_an_error() {
        let mut client = scripted("");
        assert!(client.wall_front().is_err());
    }

    #[test]
    fn test_display_sinks_translate_coordinates() {
        let mut client = scripted("");
        client.set_wall(15, 0, Direction::North).unwrap();
        client.set_text(15, 0, "14").unwrap();
        client.clear_text(0, 3).unwrap();
        assert_eq!(
            sent(&client),
            "setWall 0 0 n\nsetText 0 0 14\nclearText 3 15\n"
        );
    }
}
