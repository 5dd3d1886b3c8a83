// Copyright (c) 2025 Jihoon Kang.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod goals;
pub mod importer;
pub mod plans;
pub mod regular;
pub mod reports;
pub mod sync;
pub mod taxcmd;
pub mod transactions;
