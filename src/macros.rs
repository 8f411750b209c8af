// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Literal, const or &str var
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! row {
    // Vec<String> shorthand for one table row: row!["a", "b", var]
    () => {
        ::std::vec::Vec::<::std::string::String>::new()
    };
    ($($cell:expr),+ $(,)?) => {
        vec![$( ::std::string::String::from($cell) ),+]
    };
}
