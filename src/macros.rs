// src/macros.rs

/// Owned string from anything `String::from` takes: `s!(poster.title)`.
/// `s!()` is an empty one.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Glue string slices into one owned `String`, e.g. `join!(stem, "_", ext)`
/// for a poster filename or `join!(FILE_PREFIX, title)` for an API title.
#[macro_export]
macro_rules! join {
    ($head:expr $(, $tail:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($head);
        $( out.push_str($tail); )+
        out
    }};
}
