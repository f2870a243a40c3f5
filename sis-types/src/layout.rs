/// Размещение кадра внутри «двойного» SIS-изображения при записи.
///
/// По соглашению формата в файле лежат два кадра, сложенные по высоте.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Кадр записывается как есть, без дублирования
    Single,
    /// Слот 0: данные сверху, снизу нули
    Top,
    /// Слот 1: сверху нули, данные снизу
    Bottom,
    /// Один и тот же кадр в обеих половинах
    #[default]
    Double,
}

impl Layout {
    /// Во сколько раз высота файла больше высоты исходного кадра.
    pub fn height_factor(&self) -> usize {
        match self {
            Layout::Single => 1,
            Layout::Top | Layout::Bottom | Layout::Double => 2,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Layout::Single => write!(f, "single"),
            Layout::Top => write!(f, "top"),
            Layout::Bottom => write!(f, "bottom"),
            Layout::Double => write!(f, "double"),
        }
    }
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Layout::Single),
            "top" | "0" => Ok(Layout::Top),
            "bottom" | "1" => Ok(Layout::Bottom),
            "double" | "none" => Ok(Layout::Double),
            _ => Err(format!(
                "Unknown layout '{s}'. Use: single, top, bottom, double"
            )),
        }
    }
}
