/// The rendering target of one chart: the last emitted SVG document and how often it was redrawn.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    svg: Option<String>,
    redraws: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, svg: String) {
        self.svg = Some(svg);
        self.redraws += 1;
    }

    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }
}
