use crate::{SisError, SisResult};

/// Размер изображения в пикселях (высота × ширина).
///
/// Обе размерности хранятся в заголовке как u16, поэтому максимум 65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Количество строк
    pub height: u16,
    /// Количество столбцов
    pub width: u16,
}

impl Shape {
    pub fn new(
        height: u16,
        width: u16,
    ) -> Self {
        Shape { height, width }
    }

    /// Строит форму из размерностей массива, проверяя диапазон u16 и нули.
    pub fn from_dims(
        height: usize,
        width: usize,
    ) -> SisResult<Self> {
        if height == 0 || width == 0 {
            return Err(SisError::invalid_shape(format!(
                "{height}x{width} has a zero dimension"
            )));
        }

        let h = u16::try_from(height).map_err(|_| {
            SisError::invalid_shape(format!("height {height} exceeds u16 range ({})", u16::MAX))
        })?;
        let w = u16::try_from(width).map_err(|_| {
            SisError::invalid_shape(format!("width {width} exceeds u16 range ({})", u16::MAX))
        })?;

        Ok(Shape::new(h, w))
    }

    /// Количество выборок `height × width`.
    pub fn len(&self) -> usize {
        self.height as usize * self.width as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Строка, по которой кадр делится на верхнюю и нижнюю половины.
    pub fn split_row(&self) -> usize {
        self.height as usize / 2
    }

    /// `(height, width)` в виде usize — удобно для ndarray.
    pub fn dims(&self) -> (usize, usize) {
        (self.height as usize, self.width as usize)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
