//!The request input stream.

use std::fmt;
use std::io::{self, Cursor, Read};
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_BODY_ID: AtomicUsize = AtomicUsize::new(0);

///Identifies one particular `Body`.
///
///Every body gets a new id when it's created, so two bodies are only equal
///in id if they are the same body. The id is used to tell if a cached result
///was produced from the body that is currently in the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

///A request body that can only be read once.
///
///The body is the transport's input stream, positioned at the start of the
///request body. Reading it hands out the bytes and leaves the body consumed,
///so a second read is an error instead of silently returning nothing.
pub struct Body {
    id: BodyId,
    reader: MaybeConsumed,
}

impl Body {
    ///Wrap a reader, positioned at the start of the request body.
    pub fn new<R: Read + 'static>(reader: R) -> Body {
        Body {
            id: BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed)),
            reader: MaybeConsumed::Unread(Box::new(reader)),
        }
    }

    ///Create a body from bytes in memory.
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Body {
        Body::new(Cursor::new(bytes.into()))
    }

    ///Create a stand-in body with nothing to read, for environments where
    ///the input isn't a real stream.
    pub fn placeholder() -> Body {
        Body::new(io::empty())
    }

    ///The identity of this body.
    pub fn id(&self) -> BodyId {
        self.id
    }

    ///Check if the body has already been read.
    pub fn is_consumed(&self) -> bool {
        match self.reader {
            MaybeConsumed::Unread(_) => false,
            MaybeConsumed::Consumed => true,
        }
    }

    ///Read the body, or at most `limit` bytes of it.
    ///
    ///The body counts as consumed afterwards, even if the read fails half
    ///way, and every later call will return an error.
    pub fn read_once(&mut self, limit: Option<u64>) -> io::Result<Vec<u8>> {
        let mut reader = match mem::replace(&mut self.reader, MaybeConsumed::Consumed) {
            MaybeConsumed::Unread(reader) => reader,
            MaybeConsumed::Consumed => return Err(io::Error::new(
                io::ErrorKind::Other,
                "the request body has already been consumed"
            )),
        };

        let mut buf = Vec::new();
        match limit {
            Some(limit) => reader.take(limit).read_to_end(&mut buf)?,
            None => reader.read_to_end(&mut buf)?,
        };

        Ok(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

enum MaybeConsumed {
    Unread(Box<dyn Read>),
    Consumed,
}
