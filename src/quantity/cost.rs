use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

pub type Euros = Quantity<0, 1>;

impl Display for Euros {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Euros {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}
