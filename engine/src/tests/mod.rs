#[cfg(test)]
mod common;
#[cfg(test)]
mod test_patterns;
#[cfg(test)]
mod test_symbols;
