#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Pending,
    Info,
    Success,
    Failure,
}

/// A one-line status message with a colour hint. An empty banner has no tone
/// and is not drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub tone: Option<Tone>,
}

impl Banner {
    pub fn new(tone: Tone, text: &str) -> Banner {
        return Banner {
            text: text.to_string(),
            tone: Some(tone),
        };
    }

    pub fn set(&mut self, tone: Tone, text: &str) {
        *self = Banner::new(tone, text);
    }

    pub fn clear(&mut self) {
        *self = Banner::default();
    }

    pub fn is_empty(&self) -> bool {
        return self.tone.is_none() && self.text.is_empty();
    }
}
