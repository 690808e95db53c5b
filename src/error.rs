/// Failures a cycle can run into. `P` is the switch pin error, `D` the display error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<P, D> {
    Pin(P),
    Display(D),
}

impl<P, D> Error<P, D> {
    pub fn describe(&self) -> &'static str {
        match self {
            Error::Pin(_) => "switch read failed",
            Error::Display(_) => "display refresh failed",
        }
    }
}
