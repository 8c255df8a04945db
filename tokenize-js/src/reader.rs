use smallvec::SmallVec;
use std::io;
use std::io::BufReader;
use std::io::Read;

// Deepest lookahead required by the punctuator decoder (`>>>=`).
const PUSHBACK: usize = 4;

/// A position-tracking stream of Unicode code points over any byte source,
/// with LIFO pushback.
///
/// `pos` counts UTF-8 bytes: it advances by the encoded length of each code
/// point on [`read`](CharReader::read) and retreats symmetrically on
/// [`unread`](CharReader::unread). End-of-input is `Ok(None)`, never an
/// error, so callers can treat it as a sentinel while still observing real
/// I/O failures. Malformed UTF-8 surfaces as an `InvalidData` I/O error.
pub struct CharReader<R> {
  rd: BufReader<R>,
  pushback: SmallVec<[char; PUSHBACK]>,
  pos: usize,
}

impl<R: Read> CharReader<R> {
  pub fn new(rd: R) -> CharReader<R> {
    CharReader {
      rd: BufReader::new(rd),
      pushback: SmallVec::new(),
      pos: 0,
    }
  }

  /// The byte offset of the next code point to be read.
  pub fn pos(&self) -> usize {
    self.pos
  }

  pub fn read(&mut self) -> io::Result<Option<char>> {
    if let Some(c) = self.pushback.pop() {
      self.pos += c.len_utf8();
      return Ok(Some(c));
    }
    let Some(b0) = self.read_byte()? else {
      return Ok(None);
    };
    let len = sequence_len(b0).ok_or_else(invalid_utf8)?;
    let mut buf = [b0, 0, 0, 0];
    for slot in buf.iter_mut().take(len).skip(1) {
      // End-of-input inside a sequence is a truncated code point.
      *slot = self.read_byte()?.ok_or_else(invalid_utf8)?;
    }
    match std::str::from_utf8(&buf[..len])
      .ok()
      .and_then(|s| s.chars().next())
    {
      Some(c) => {
        self.pos += len;
        Ok(Some(c))
      }
      None => Err(invalid_utf8()),
    }
  }

  /// Pushes a code point back in LIFO order; the next `read` returns the
  /// most recently unread code point.
  pub fn unread(&mut self, c: char) {
    self.pos -= c.len_utf8();
    self.pushback.push(c);
  }

  fn read_byte(&mut self) -> io::Result<Option<u8>> {
    let mut b = [0u8; 1];
    loop {
      match self.rd.read(&mut b) {
        Ok(0) => return Ok(None),
        Ok(_) => return Ok(Some(b[0])),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
        Err(e) => return Err(e),
      }
    }
  }
}

// Lead bytes 0xc0/0xc1 (overlong) and 0xf5..0xff can never start a valid
// sequence.
fn sequence_len(b0: u8) -> Option<usize> {
  match b0 {
    0x00..=0x7f => Some(1),
    0xc2..=0xdf => Some(2),
    0xe0..=0xef => Some(3),
    0xf0..=0xf4 => Some(4),
    _ => None,
  }
}

fn invalid_utf8() -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 in source stream")
}
