// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for ranges, repetition rules and digit arithmetic

use std::collections::BTreeSet;

pub mod digits;
pub mod range;
pub mod repetition;

/// Deduplicated, ascending set of matching ids
pub type MatchSet = BTreeSet<u64>;
