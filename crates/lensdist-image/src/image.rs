use ndarray::{Array2, Array3, ArrayD, Ix2, Ix3};

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use lensdist_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with interleaved channels, i.e. the sample
/// of channel `c` at column `x` and row `y` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use lensdist_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use lensdist_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a pixel value cannot be represented in the target type, an error is returned.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get a channel of the image.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Clone,
    {
        if channel >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, CHANNELS));
        }

        let channel_data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|pixel| pixel[channel].clone())
            .collect();

        Image::new(self.size, channel_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a sample by `[row, col, channel]` index.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, c] = index;
        if y >= self.height() || x >= self.width() || c >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + c)
    }

    /// Get all channels of the pixel at column `x` and row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let base = (y * self.width() + x) * CHANNELS;
        self.data.get(base..base + CHANNELS)
    }

    /// Copy the image into an `(height, width, channels)` array.
    pub fn to_array3(&self) -> Result<Array3<T>, ImageError>
    where
        T: Clone,
    {
        Ok(Array3::from_shape_vec(
            (self.height(), self.width(), CHANNELS),
            self.data.clone(),
        )?)
    }
}

impl<T: Clone, const CHANNELS: usize> TryFrom<ArrayD<T>> for Image<T, CHANNELS> {
    type Error = ImageError;

    /// Accepts `(H, W)` arrays for single channel images and `(H, W, C)` arrays
    /// whose last axis matches `CHANNELS`.
    fn try_from(array: ArrayD<T>) -> Result<Self, Self::Error> {
        match array.ndim() {
            2 if CHANNELS == 1 => {
                let array = array.into_dimensionality::<Ix2>()?;
                let (height, width) = array.dim();
                let data = array.iter().cloned().collect();
                Image::new(ImageSize { width, height }, data)
            }
            3 => Image::try_from(array.into_dimensionality::<Ix3>()?),
            ndim => Err(ImageError::InvalidArrayRank(ndim, CHANNELS)),
        }
    }
}

impl<T: Clone, const CHANNELS: usize> TryFrom<Array3<T>> for Image<T, CHANNELS> {
    type Error = ImageError;

    fn try_from(array: Array3<T>) -> Result<Self, Self::Error> {
        let (height, width, channels) = array.dim();
        if channels != CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                height * width * channels,
                height * width * CHANNELS,
            ));
        }

        let data = array.iter().cloned().collect();
        Image::new(ImageSize { width, height }, data)
    }
}

impl<T: Clone> TryFrom<Array2<T>> for Image<T, 1> {
    type Error = ImageError;

    fn try_from(array: Array2<T>) -> Result<Self, Self::Error> {
        let (height, width) = array.dim();
        let data = array.iter().cloned().collect();
        Image::new(ImageSize { width, height }, data)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};
    use ndarray::{Array2, Array3, ArrayD, IxDyn};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_wrong_data_length() {
        let res = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 10],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(10, 12)));
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let data = vec![0, 1, 2, 3, 4, 5];
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            data,
        )?;
        assert_eq!(image_u8.get([1, 0, 2]), Some(&5u8));

        let image_f32: Image<f32, 3> = image_u8.cast()?;
        assert_eq!(image_f32.get([1, 0, 2]), Some(&5f32));

        let negative = Image::<f32, 1>::new([1, 1].into(), vec![-1.0])?;
        assert_eq!(negative.cast::<u8>(), Err(ImageError::CastError));

        Ok(())
    }

    #[test]
    fn image_channel() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0., 1., 2., 3., 4., 5.],
        )?;

        let channel = image.channel(2)?;
        assert_eq!(channel.get([1, 0, 0]), Some(&5.0f32));
        assert_eq!(
            image.channel(3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );

        Ok(())
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5, 6, 7],
        )?;
        assert_eq!(image.pixel(1, 0), Some(&[2u8, 3][..]));
        assert_eq!(image.pixel(0, 1), Some(&[4u8, 5][..]));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.get([1, 1, 1]), Some(&7));
        assert_eq!(image.get([1, 1, 2]), None);

        Ok(())
    }

    #[test]
    fn image_from_arrays() -> Result<(), ImageError> {
        let gray = Array2::from_shape_vec((2, 3), vec![0u8, 1, 2, 3, 4, 5])?;
        let image = Image::<u8, 1>::try_from(gray)?;
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.get([1, 0, 0]), Some(&3));

        let rgb = Array3::from_shape_fn((2, 2, 3), |(y, x, c)| (y * 6 + x * 3 + c) as u8);
        let image = Image::<u8, 3>::try_from(rgb.clone())?;
        assert_eq!(image.as_slice(), &(0..12).collect::<Vec<u8>>()[..]);
        assert_eq!(image.to_array3()?, rgb);

        Ok(())
    }

    #[test]
    fn image_from_array_rejects_bad_shapes() -> Result<(), ImageError> {
        let flat = ArrayD::<u8>::zeros(IxDyn(&[4]));
        assert_eq!(
            Image::<u8, 1>::try_from(flat),
            Err(ImageError::InvalidArrayRank(1, 1))
        );

        let gray = ArrayD::<u8>::zeros(IxDyn(&[2, 2]));
        assert_eq!(
            Image::<u8, 3>::try_from(gray),
            Err(ImageError::InvalidArrayRank(2, 3))
        );

        let rgba = ArrayD::<u8>::zeros(IxDyn(&[2, 2, 4]));
        assert!(matches!(
            Image::<u8, 3>::try_from(rgba),
            Err(ImageError::InvalidChannelShape(16, 12))
        ));

        let rgb = ArrayD::<u8>::zeros(IxDyn(&[2, 2, 3]));
        assert_eq!(
            Image::<u8, 3>::try_from(rgb)?.size(),
            ImageSize {
                width: 2,
                height: 2
            }
        );

        Ok(())
    }
}
