//! Zero-copy window view over a borrowed signal.

use ndarray::{s, Array, ArrayD, ArrayView1, ArrayViewD, Axis, Ix1, IxDyn};

/// Read-only view of the fixed-stride windows of a signal.
///
/// Holds a borrow of the signal plus the window descriptor
/// `(num_windows, window_size, stride)`. Logical shape is
/// `[..batch, num_windows, window_size]` with
/// `view[..batch, i, j] == signal[..batch, i * stride + j]`.
///
/// The view never copies or mutates the signal. Windows are handed out as
/// [`ArrayView1`] slices of the signal itself; [`SlidingWindows::to_array`] is the only
/// operation that allocates.
#[derive(Debug)]
pub struct SlidingWindows<'a, A> {
    signal: ArrayViewD<'a, A>,
    window_size: usize,
    stride: usize,
    num_windows: usize,
}

impl<A> Clone for SlidingWindows<'_, A> {
    fn clone(&self) -> Self {
        Self {
            signal: self.signal.clone(),
            ..*self
        }
    }
}

impl<'a, A> SlidingWindows<'a, A> {
    /// Caller has validated the descriptor against the signal's last axis.
    pub(crate) fn new(
        signal: ArrayViewD<'a, A>,
        window_size: usize,
        stride: usize,
        num_windows: usize,
    ) -> Self {
        debug_assert!(signal.ndim() >= 1);
        debug_assert!(window_size >= 1 && stride >= 1);
        Self {
            signal,
            window_size,
            stride,
            num_windows,
        }
    }

    /// Logical shape `[..batch, num_windows, window_size]`.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.batch_shape().to_vec();
        shape.push(self.num_windows);
        shape.push(self.window_size);
        shape
    }

    /// Leading (batch) axes of the signal.
    pub fn batch_shape(&self) -> &[usize] {
        let shape = self.signal.shape();
        &shape[..shape.len() - 1]
    }

    /// Windows per batch lane.
    pub fn num_windows(&self) -> usize {
        self.num_windows
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total number of windows across all batch lanes.
    pub fn len(&self) -> usize {
        self.lane_count() * self.num_windows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The borrowed signal.
    pub fn signal(&self) -> &ArrayViewD<'a, A> {
        &self.signal
    }

    fn lane_count(&self) -> usize {
        self.batch_shape().iter().product()
    }

    fn lane(&self, batch_index: &[usize]) -> Option<ArrayView1<'a, A>> {
        if batch_index.len() + 1 != self.signal.ndim() {
            return None;
        }

        let mut lane = self.signal.clone();
        for &b in batch_index {
            if b >= lane.len_of(Axis(0)) {
                return None;
            }
            lane = lane.index_axis_move(Axis(0), b);
        }
        lane.into_dimensionality::<Ix1>().ok()
    }

    /// Window `i` of the batch lane at `batch_index`.
    ///
    /// `batch_index` has one entry per batch axis (empty for a 1-D signal). Returns
    /// `None` if any index is out of range.
    pub fn window(&self, batch_index: &[usize], i: usize) -> Option<ArrayView1<'a, A>> {
        if i >= self.num_windows {
            return None;
        }
        let start = i * self.stride;
        let lane = self.lane(batch_index)?;
        Some(lane.slice_move(s![start..start + self.window_size]))
    }

    /// Element at `[..batch, i, j]` of the logical shape.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        let ndim = self.signal.ndim();
        if index.len() != ndim + 1 {
            return None;
        }

        let (batch, tail) = index.split_at(ndim - 1);
        let (i, j) = (tail[0], tail[1]);
        if i >= self.num_windows || j >= self.window_size {
            return None;
        }

        let mut position = batch.to_vec();
        position.push(i * self.stride + j);
        self.signal.get(position.as_slice())
    }

    /// Iterate over every window, batch lanes outer and window index inner.
    pub fn iter(&self) -> Windows<'_, 'a, A> {
        Windows {
            view: self,
            current: None,
            lane: 0,
            lanes: self.lane_count(),
            index: 0,
        }
    }

    /// Copy the windows into an owned array of shape [`SlidingWindows::shape`].
    pub fn to_array(&self) -> ArrayD<A>
    where
        A: Clone,
    {
        let ndim = self.signal.ndim();
        let stride = self.stride;
        let mut position = vec![0; ndim];

        Array::from_shape_fn(IxDyn(&self.shape()), |index: IxDyn| {
            for axis in 0..ndim - 1 {
                position[axis] = index[axis];
            }
            position[ndim - 1] = index[ndim - 1] * stride + index[ndim];
            self.signal[position.as_slice()].clone()
        })
    }
}

impl<'v, 'a, A> IntoIterator for &'v SlidingWindows<'a, A> {
    type Item = ArrayView1<'a, A>;
    type IntoIter = Windows<'v, 'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the windows of a [`SlidingWindows`] view.
pub struct Windows<'v, 'a, A> {
    view: &'v SlidingWindows<'a, A>,
    current: Option<ArrayView1<'a, A>>,
    lane: usize,
    lanes: usize,
    index: usize,
}

impl<'a, A> Iterator for Windows<'_, 'a, A> {
    type Item = ArrayView1<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(lane) = &self.current {
                if self.index < self.view.num_windows {
                    let start = self.index * self.view.stride;
                    self.index += 1;
                    return Some(
                        lane.clone()
                            .slice_move(s![start..start + self.view.window_size]),
                    );
                }
            }

            if self.lane >= self.lanes {
                self.current = None;
                return None;
            }

            let batch_index = unravel(self.lane, self.view.batch_shape());
            self.current = self.view.lane(&batch_index);
            self.lane += 1;
            self.index = 0;
        }
    }
}

/// Row-major multi-index of flat position `flat` within `shape`.
fn unravel(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (slot, &dim) in index.iter_mut().zip(shape).rev() {
        *slot = flat % dim;
        flat /= dim;
    }
    index
}

#[cfg(test)]
mod tests {
    use crate::windowing::sliding_window_cpu;
    use ndarray::{Array1, Array3};
    use std::cell::Cell;

    use super::{unravel, SlidingWindows, Windows};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_view_is_send_sync() {
        assert_send_sync::<SlidingWindows<'static, f64>>();
        assert_send_sync::<SlidingWindows<'static, i32>>();
        assert_send_sync::<Windows<'static, 'static, f64>>();
    }

    #[test]
    fn test_view_crosses_threads() {
        let signal = Array1::from_iter((0..12).map(|x| x as f64));
        let windows = sliding_window_cpu(&signal, 4, 4, false).unwrap();

        let sums: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..windows.num_windows())
                .map(|i| {
                    let windows = &windows;
                    scope.spawn(move || windows.window(&[], i).unwrap().sum())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // (12 - 4 + 1) / 4 = 2 windows
        assert_eq!(sums, vec![6.0, 22.0]);
    }

    #[test]
    fn test_view_shares_storage() {
        let signal: Array1<Cell<f64>> = (0..10).map(|x| Cell::new(x as f64)).collect();
        let windows = sliding_window_cpu(&signal, 4, 2, false).unwrap();

        assert_eq!(windows.get(&[1, 1]).unwrap().get(), 3.0);

        // Written through the signal, read through the view
        signal[3].set(42.0);
        assert_eq!(windows.get(&[1, 1]).unwrap().get(), 42.0);
        assert_eq!(windows.get(&[0, 3]).unwrap().get(), 42.0);
        assert_eq!(windows.window(&[], 1).unwrap()[1].get(), 42.0);
    }

    #[test]
    fn test_windows_point_into_signal() {
        let signal = Array1::from_iter((0..10).map(|x| x as f64));
        let windows = sliding_window_cpu(&signal, 4, 3, false).unwrap();

        for (i, window) in windows.iter().enumerate() {
            assert_eq!(window.as_ptr(), signal.as_ptr().wrapping_add(i * 3));
        }
    }

    #[test]
    fn test_get_bounds() {
        let signal = Array1::from_iter((0..10).map(|x| x as f64));
        let windows = sliding_window_cpu(&signal, 4, 2, false).unwrap();

        assert_eq!(windows.get(&[2, 3]), Some(&7.0));
        assert_eq!(windows.get(&[3, 0]), None);
        assert_eq!(windows.get(&[0, 4]), None);
        assert_eq!(windows.get(&[0]), None);
        assert_eq!(windows.get(&[0, 0, 0]), None);
    }

    #[test]
    fn test_iter_batched() {
        let signal = Array3::from_shape_fn((2, 3, 6), |(a, b, t)| (a * 100 + b * 10 + t) as f64);
        let windows = sliding_window_cpu(&signal, 3, 2, false).unwrap();

        assert_eq!(windows.shape(), vec![2, 3, 2, 3]);
        assert_eq!(windows.len(), 12);

        let firsts: Vec<f64> = windows.iter().map(|w| w[0]).collect();
        assert_eq!(
            firsts,
            vec![0.0, 2.0, 10.0, 12.0, 20.0, 22.0, 100.0, 102.0, 110.0, 112.0, 120.0, 122.0]
        );
        assert_eq!((&windows).into_iter().count(), windows.len());
    }

    #[test]
    fn test_empty_view() {
        let signal = Array1::from_iter((0..10).map(|x| x as f64));
        let windows = sliding_window_cpu(&signal, 8, 4, false).unwrap();

        assert!(windows.is_empty());
        assert_eq!(windows.shape(), vec![0, 8]);
        assert_eq!(windows.iter().count(), 0);
        assert_eq!(windows.to_array().shape(), &[0, 8]);
    }

    #[test]
    fn test_to_array() {
        let signal = Array1::from_iter((0..8).map(|x| x as i64));
        let windows = sliding_window_cpu(&signal, 3, 2, false).unwrap();
        let owned = windows.to_array();

        assert_eq!(owned.shape(), &[3, 3]);
        assert_eq!(
            owned.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 2, 3, 4, 4, 5, 6]
        );
    }

    #[test]
    fn test_clone_keeps_descriptor() {
        let signal = Array1::from_iter((0..10).map(|x| x as f64));
        let windows = sliding_window_cpu(&signal, 4, 2, false).unwrap();
        let copy = windows.clone();

        assert_eq!(copy.shape(), windows.shape());
        assert_eq!(copy.stride(), 2);
        assert_eq!(copy.window_size(), 4);
    }

    #[test]
    fn test_unravel() {
        assert_eq!(unravel(0, &[]), Vec::<usize>::new());
        assert_eq!(unravel(5, &[2, 3]), vec![1, 2]);
        assert_eq!(unravel(3, &[2, 3]), vec![1, 0]);
    }
}
