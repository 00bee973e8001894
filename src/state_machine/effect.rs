//! Effects produced by state transitions

/// An ordered list of selectable text options, rendered by the gateway
/// as a one-time, auto-resizing reply keyboard. Presentation only: the
/// state machine never requires the reply to come from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub options: Vec<String>,
}

impl Keyboard {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// Effects to be executed after a state transition commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a text reply to the user.
    SendText {
        body: String,
        keyboard: Option<Keyboard>,
        /// Render the body as Markdown (used for the order summary).
        markdown: bool,
    },
}

impl Effect {
    /// A prompt with a reply keyboard attached.
    pub fn prompt<I, S>(body: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Effect::SendText {
            body: body.into(),
            keyboard: Some(Keyboard::new(options)),
            markdown: false,
        }
    }

    /// A plain text notice without a keyboard.
    pub fn notice(body: impl Into<String>) -> Self {
        Effect::SendText {
            body: body.into(),
            keyboard: None,
            markdown: false,
        }
    }

    /// A Markdown-rendered body without a keyboard.
    pub fn markdown(body: impl Into<String>) -> Self {
        Effect::SendText {
            body: body.into(),
            keyboard: None,
            markdown: true,
        }
    }
}
