//! # quote-moment CLI
//!
//! Command-line interface for the quote of the moment.
//!
//! ## Usage
//! ```bash
//! quote-moment next
//! quote-moment history --output json
//! quote-moment interactive
//! ```

mod cli;

use quote_moment::Result;

fn main() -> Result<()> {
    quote_moment::init_tracing();
    cli::run()
}
