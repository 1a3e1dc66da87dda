//! Debug and timing facilities shared across modules.
//!
//! The crate-wide `Error` type lives in `error`; this module keeps the
//! formatter helpers and timing macros used by `statistics` and the
//! `--verbose` diagnostics in `cli`.

pub fn opt_fmt<T: std::fmt::Debug>(
    option: &Option<T>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    match option {
        Some(val) => val.fmt(f),
        None => write!(f, "None"),
    }
}

#[allow(clippy::ptr_arg)]
pub fn bin_fmt(vec: &Vec<u64>, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{")?;
    for number in vec {
        write!(f, "{:#066b}", number)?;
    }
    write!(f, "}}")?;

    Ok(())
}

// Debug macros that allow timing single expressions.

#[macro_export]
macro_rules! time {
    ($i:ident, $ret:ident, $exp:expr) => {
        let before = std::time::Instant::now();
        let $ret = $exp;
        let $i = before.elapsed();
    };
}

#[macro_export]
macro_rules! print_time {
    ($name:expr, $ret:ident, $exp:expr) => {
        let before = std::time::Instant::now();
        let $ret = $exp;
        eprintln!("{} took {:?}", $name, before.elapsed());
    };
}
