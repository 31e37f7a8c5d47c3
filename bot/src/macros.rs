/// Unwraps Option if Some() else substitutes provided expression
#[macro_export]
macro_rules! ward {
    ($opt:expr, $x:expr) => {
        match $opt {
            Some(result) => result,
            None => $x,
        }
    };
}
