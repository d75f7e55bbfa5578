// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string-like pieces into a new `String`. The first piece may be
/// anything `String: From`; the rest only need `AsRef<str>`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str(::std::convert::AsRef::<str>::as_ref(&$rest));
        )+
        s
    }};
}
