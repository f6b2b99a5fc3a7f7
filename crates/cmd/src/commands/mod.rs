// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod email;
pub mod fetch;
pub mod scaffold;

pub use email::email_command;
pub use fetch::fetch_command;
pub use scaffold::scaffold_command;
