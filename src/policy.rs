/// Whether a write is mirrored to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsolePolicy {
    /// Follow the handle's mute flag.
    #[default]
    PerHandle,
    /// File only.
    Never,
    /// File and console.
    Always,
}

impl ConsolePolicy {
    /// Resolve the policy against a mute flag.
    pub fn shows(self, muted: bool) -> bool {
        match self {
            Self::PerHandle => !muted,
            Self::Never => false,
            Self::Always => true,
        }
    }
}

/// What a single write puts on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// Only the current stamp.
    Time,
    /// Only the caller's text.
    Text,
    /// Stamp followed by text. The console copy also carries the log name.
    #[default]
    Stamped,
}

impl Shape {
    /// Record written to the system log after a write of this shape.
    pub(crate) fn event(self) -> &'static str {
        match self {
            Self::Time => "add time\n",
            Self::Text => "add a text\n",
            Self::Stamped => "add a log\n",
        }
    }
}

/// Options for [`LogHandle::write`](crate::LogHandle::write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub shape: Shape,
    pub console: ConsolePolicy,
}

impl WriteOptions {
    pub const fn new(shape: Shape, console: ConsolePolicy) -> Self {
        Self { shape, console }
    }

    pub const fn time() -> Self {
        Self::new(Shape::Time, ConsolePolicy::PerHandle)
    }

    pub const fn text() -> Self {
        Self::new(Shape::Text, ConsolePolicy::PerHandle)
    }

    pub const fn stamped() -> Self {
        Self::new(Shape::Stamped, ConsolePolicy::PerHandle)
    }

    /// Same shape, file only.
    pub const fn mute(self) -> Self {
        Self::new(self.shape, ConsolePolicy::Never)
    }

    /// Same shape, always mirrored to the console.
    pub const fn nomute(self) -> Self {
        Self::new(self.shape, ConsolePolicy::Always)
    }
}
