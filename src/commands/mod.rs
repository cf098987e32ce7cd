// Copyright (c) 2026 Caisse Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod entries;
pub mod customers;
pub mod employees;
pub mod credits;
pub mod employee_credits;
pub mod payments;
pub mod settings;
pub mod exporter;
pub mod doctor;
