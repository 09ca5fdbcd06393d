/// Holds a busy flag high for as long as it lives.
///
/// Dropping the guard (normally, on `?`, or when the owning future is
/// cancelled) always lowers the flag again.
pub(crate) struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn engage(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
