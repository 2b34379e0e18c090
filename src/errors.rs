// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
// ResultExt adds the `chain_err` trait method.
#![allow(deprecated)]

use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid maze dimensions")
            display("Invalid maze dimensions {} rows x {} columns: both must be at least 1 and the cell count must fit in memory",
                    rows, columns)
        }
    }
}
