//! String errors for configuration, vocabulary files and rendering.
//!
//! Classification itself cannot fail. Everything around it reports problems
//! as plain messages, optionally with hints for the user.

use std::fmt::{self, Display, Formatter};

use ecow::EcoVec;

/// Return early with an error message.
///
/// Takes a format string with arguments. Each `; hint: "..."` suffix attaches
/// a hint and makes the error a [`HintedString`].
///
/// ```ignore
/// bail!("unknown token kind `{name}`");
/// bail!("missing vocabulary"; hint: "generate it with {}", tool);
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    ($($tts:tt)*) => {
        return Err($crate::diag::error!($($tts)*))
    };
}

/// Build an error message without returning it.
///
/// Without hints, this produces anything an [`EcoString`] converts into.
#[macro_export]
#[doc(hidden)]
macro_rules! __error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::diag::eco_format!($fmt $(, $arg)*).into()
    };
    (
        $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)+
        $(,)?
    ) => {
        $crate::diag::HintedString::new($crate::diag::eco_format!($fmt $(, $arg)*))
            $(.with_hint($crate::diag::eco_format!($hint $(, $hint_arg)*)))+
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    crate::__error as error,
    ecow::{EcoString, eco_format},
};

/// The result of an operation that fails with a message.
pub type StrResult<T> = Result<T, EcoString>;

/// The result of an operation that fails with a message and hints.
pub type HintedStrResult<T> = Result<T, HintedString>;

/// An error message together with hints on how to fix it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HintedString {
    message: EcoString,
    hints: EcoVec<EcoString>,
}

impl HintedString {
    /// An error without hints.
    pub fn new(message: EcoString) -> Self {
        Self { message, hints: EcoVec::new() }
    }

    /// What went wrong.
    pub fn message(&self) -> &EcoString {
        &self.message
    }

    /// Suggestions for the user, in the order they were attached.
    pub fn hints(&self) -> &[EcoString] {
        &self.hints
    }

    /// Attach a hint.
    pub fn hint(&mut self, hint: impl Into<EcoString>) {
        self.hints.push(hint.into());
    }

    /// Attach a hint, builder-style.
    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint(hint);
        self
    }
}

impl Display for HintedString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl<S: Into<EcoString>> From<S> for HintedString {
    fn from(message: S) -> Self {
        Self::new(message.into())
    }
}

/// Attach a hint to the error of a result.
pub trait Hint<T> {
    /// Add the hint if the result is an error.
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T>;
}

impl<T, S: Into<EcoString>> Hint<T> for Result<T, S> {
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T> {
        self.map_err(|message| HintedString::new(message.into()).with_hint(hint))
    }
}

impl<T> Hint<T> for HintedStrResult<T> {
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T> {
        self.map_err(|error| error.with_hint(hint))
    }
}
