// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use fastaseq::errors::SeqError;

fn main() -> Result<(), SeqError> {
    fastaseq::run()
}
