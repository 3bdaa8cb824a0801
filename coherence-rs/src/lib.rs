// Copyright 2021 Rigetti Computing
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Generation of the Quil sequences used to characterize qubit coherence.
//!
//! Within this crate you'll find:
//!
//! * Builders for the three coherence [experiments]: T1 (energy decay), T2 (Hahn echo) and
//!   T2* (Ramsey with an artificial oscillation)
//! * A small Quil [sequence] model with a [serializer] to Quil text
//! * Validated [configuration] types for the delay schedule and the qubit register
//!
//! Each builder returns one [`Sequence`] per delay entry together with the elapsed-time axis
//! that downstream fitting code expects. Nothing here executes a sequence or fits a curve.
//!
//! ```
//! use coherence_rs::{t1_sequences, DelaySchedule, QubitLayout};
//!
//! let schedule = DelaySchedule::new(vec![0, 1, 2], 0.1).unwrap();
//! let layout = QubitLayout::from_qubits(vec![0]).unwrap();
//! let batch = t1_sequences(&schedule, &layout).unwrap();
//!
//! assert_eq!(batch.sequences.len(), 3);
//! assert_eq!(batch.sequences[1].name, "circuit_1");
//! ```
//!
//! [configuration]: crate::layout
//! [experiments]: crate::coherence::Experiment
//! [sequence]: crate::sequence::Sequence
//! [serializer]: crate::quil::Quil

pub mod coherence;
pub mod expression;
mod floating_point_eq;
pub mod instruction;
pub mod layout;
mod macros;
pub mod quil;
pub mod sequence;

pub use coherence::{
    t1_sequences, t2_sequences, t2_star_sequences, CoherenceError, CoherenceSequences, Experiment,
    ExperimentKind,
};
pub use layout::{DelaySchedule, QubitLayout};
pub use sequence::Sequence;
