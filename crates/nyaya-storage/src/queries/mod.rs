// SPDX-FileCopyrightText: 2026 Nyaya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules for each table.

pub mod qa_records;
pub mod users;
