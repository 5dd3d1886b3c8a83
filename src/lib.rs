// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bank;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod simulate;
pub mod stats;
pub mod tax;
pub mod utils;
