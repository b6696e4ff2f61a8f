//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Console front-end for [`llslr`].
//!
//! Reads a grammar in the one-character-per-symbol notation of [`reader`],
//! reports whether it is LL(1), SLR(1), both or neither, and then answers
//! `yes`/`no` for input strings (see [`session`]).

pub mod reader;
pub mod session;

pub use reader::{Notation, ReadError, Rule};
pub use session::{Config, run};
