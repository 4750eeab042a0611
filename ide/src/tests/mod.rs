#[cfg(test)]
mod common;
#[cfg(test)]
mod test_resolver;
#[cfg(test)]
mod test_suggest;
