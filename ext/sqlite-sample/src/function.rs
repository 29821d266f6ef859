///
/// Function descriptors and the evaluation contract.
///
/// A `FunctionDescriptor` is the metadata a host needs to expose one scalar
/// function: name, arity, flags, and the callback. Callbacks never talk to
/// SQLite directly. They write their result into an `EvalContext`, which the
/// host adapter turns into whatever value-passing convention it uses.
///
/// Result values carry a lifetime tag so the hand-off contract is explicit:
/// - `Static`: bytes live as long as the module; the host must not free them
/// - `Transient`: the host copies the bytes before the callback's buffer goes away.
///   Host adapters retag values this way once they have taken a copy
/// - `Owned`: ownership of the bytes moves to the host, which drops them
///

use std::borrow::Cow;

use rusqlite::functions::FunctionFlags;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};

/// Signature shared by every scalar callback.
pub type ScalarFn = fn(ctx: &mut dyn EvalContext, args: &[ValueRef<'_>]);

/// Per-invocation handle through which a callback reports its outcome.
pub trait EvalContext {
    fn set_result(&mut self, value: ResultValue);
    fn set_error(&mut self, message: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLifetime {
    Static,
    Transient,
    Owned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultValue {
    Null,
    Text {
        text: Cow<'static, str>,
        lifetime: TextLifetime,
    },
}

impl ResultValue {
    pub fn static_text(text: &'static str) -> Self {
        Self::Text {
            text: Cow::Borrowed(text),
            lifetime: TextLifetime::Static,
        }
    }

    pub fn owned_text(text: impl Into<String>) -> Self {
        Self::Text {
            text: Cow::Owned(text.into()),
            lifetime: TextLifetime::Owned,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(&**text),
            Self::Null => None,
        }
    }

    pub fn lifetime(&self) -> Option<TextLifetime> {
        match self {
            Self::Text { lifetime, .. } => Some(*lifetime),
            Self::Null => None,
        }
    }

    /// Convert into rusqlite's output value. rusqlite copies text results
    /// into SQLite, so every tag ends up as a host-side copy.
    pub fn into_sql_output(self) -> ToSqlOutput<'static> {
        match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Text {
                text: Cow::Borrowed(text),
                ..
            } => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
            Self::Text {
                text: Cow::Owned(text),
                ..
            } => ToSqlOutput::Owned(Value::Text(text)),
        }
    }
}

/// Collects the outcome of a single callback invocation.
///
/// A callback that reports nothing yields SQL NULL. When several values are
/// reported, the last one wins, matching `sqlite3_result_*` semantics.
#[derive(Debug, Default)]
pub struct Evaluation {
    outcome: Option<Result<ResultValue, String>>,
}

impl Evaluation {
    pub fn run(callback: ScalarFn, args: &[ValueRef<'_>]) -> Result<ResultValue, String> {
        let mut evaluation = Self::default();
        callback(&mut evaluation, args);
        evaluation.finish()
    }

    pub fn finish(self) -> Result<ResultValue, String> {
        self.outcome.unwrap_or(Ok(ResultValue::Null))
    }
}

impl EvalContext for Evaluation {
    fn set_result(&mut self, value: ResultValue) {
        self.outcome = Some(Ok(value));
    }

    fn set_error(&mut self, message: String) {
        self.outcome = Some(Err(message));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    /// Number of arguments; 0 means none, -1 means any.
    pub arity: i32,
    pub flags: FunctionFlags,
    pub callback: ScalarFn,
}

impl FunctionDescriptor {
    pub fn evaluate(&self, args: &[ValueRef<'_>]) -> Result<ResultValue, String> {
        Evaluation::run(self.callback, args)
    }

    pub fn is_deterministic(&self) -> bool {
        self.flags.contains(FunctionFlags::SQLITE_DETERMINISTIC)
    }

    pub fn accepts(&self, argc: usize) -> bool {
        self.arity < 0 || usize::try_from(self.arity).is_ok_and(|arity| arity == argc)
    }
}
