//! Call flow reconstruction for parsed Java corpora.
//!
//! Binary crate entry point. All CLI logic is in the `cli` module.

// mimalloc returns freed pages to the OS promptly; large corpora allocate
// many short-lived strings during resolution.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli;

fn main() {
    cli::run();
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
