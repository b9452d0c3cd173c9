//! Console port - a line-oriented output sink for dumps and diagnostics.

pub trait LineSink {
    fn print_line(&mut self, line: &str);
}

impl LineSink for Vec<String> {
    fn print_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn print_line(&mut self, line: &str) {
        (**self).print_line(line);
    }
}

impl<T: LineSink + ?Sized> LineSink for Box<T> {
    fn print_line(&mut self, line: &str) {
        (**self).print_line(line);
    }
}
