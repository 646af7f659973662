//! Named function table for solver callbacks.
//!
//! Functions are declared once with a name and an arity, then invoked by name
//! with an [`ArgList`]. A callback returns a [`Jet`]; its value is the call
//! result, and its first and second derivatives (with respect to the first
//! argument) are written into the derivative slots the caller asked for.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CallbackError, Result};
use crate::geometry::Jet;

type Callback = Box<dyn Fn(&[f64]) -> Jet + Send + Sync>;

/// Number of arguments a registered function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exactly(usize),
    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Decodes the solver's signed `nargs` convention.
    ///
    /// `nargs >= 0` means exactly `nargs` arguments, `nargs <= -1` means at
    /// least `-(nargs + 1)`.
    #[must_use]
    pub fn from_nargs(nargs: i32) -> Self {
        let n = usize::try_from(nargs).unwrap_or_else(|_| {
            usize::try_from(-(i64::from(nargs) + 1)).unwrap_or_default()
        });
        if nargs >= 0 {
            Self::Exactly(n)
        } else {
            Self::AtLeast(n)
        }
    }

    /// Returns whether `count` arguments satisfy this arity.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }

    // Smallest accepted argument count.
    fn minimum(self) -> usize {
        match self {
            Self::Exactly(n) | Self::AtLeast(n) => n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Arguments and derivative slots for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgList {
    /// Real arguments.
    pub ra: Vec<f64>,
    /// First-derivative slots, present when the caller wants gradients.
    pub derivs: Option<Vec<f64>>,
    /// Second-derivative slots, present when the caller wants Hessians.
    pub hes: Option<Vec<f64>>,
}

impl ArgList {
    /// Creates an argument list that requests no derivatives.
    #[must_use]
    pub fn new(ra: Vec<f64>) -> Self {
        Self {
            ra,
            derivs: None,
            hes: None,
        }
    }

    /// Requests first derivatives, one slot per argument.
    #[must_use]
    pub fn with_derivs(mut self) -> Self {
        self.derivs = Some(vec![0.0; self.ra.len()]);
        self
    }

    /// Requests second derivatives, packed upper triangle of the Hessian.
    #[must_use]
    pub fn with_hessian(mut self) -> Self {
        let n = self.ra.len();
        self.hes = Some(vec![0.0; n * (n + 1) / 2]);
        self
    }
}

struct Entry {
    arity: Arity,
    callback: Callback,
}

/// A table of named real-valued callbacks.
#[derive(Default)]
pub struct FunctionTable {
    entries: BTreeMap<String, Entry>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is already registered, or if `arity` admits
    /// calls with no argument.
    pub fn add_func<F>(&mut self, name: &str, arity: Arity, callback: F) -> Result<()>
    where
        F: Fn(&[f64]) -> Jet + Send + Sync + 'static,
    {
        if self.entries.contains_key(name) {
            return Err(CallbackError::Duplicate(name.to_owned()).into());
        }
        if arity.minimum() == 0 {
            return Err(CallbackError::ArityMismatch {
                name: name.to_owned(),
                expected: "at least 1".to_owned(),
                got: 0,
            }
            .into());
        }
        self.entries.insert(
            name.to_owned(),
            Entry {
                arity,
                callback: Box::new(callback),
            },
        );
        Ok(())
    }

    /// Returns whether a function named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the arity `name` was registered with.
    #[must_use]
    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.entries.get(name).map(|e| e.arity)
    }

    /// Invokes `name` with `args`.
    ///
    /// Writes the first derivative into `derivs[0]` and the second into
    /// `hes[0]` when those slots were requested, and returns the value.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is unknown or the argument count does not
    /// match its arity.
    pub fn call(&self, name: &str, args: &mut ArgList) -> Result<f64> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CallbackError::UnknownFunction(name.to_owned()))?;
        if !entry.arity.accepts(args.ra.len()) {
            return Err(CallbackError::ArityMismatch {
                name: name.to_owned(),
                expected: entry.arity.to_string(),
                got: args.ra.len(),
            }
            .into());
        }

        let jet = (entry.callback)(&args.ra);
        if let Some(slot) = args.derivs.as_mut().and_then(|d| d.first_mut()) {
            *slot = jet.d1;
        }
        if let Some(slot) = args.hes.as_mut().and_then(|h| h.first_mut()) {
            *slot = jet.d2;
        }
        Ok(jet.value)
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.arity)))
            .finish()
    }
}
