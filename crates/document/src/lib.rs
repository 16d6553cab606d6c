use model::{
    Brush, MAX_STORED_STROKES, MAX_STROKE_POINTS, PointArena, Rectl, Stroke, V2l,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("in-progress stroke is full ({capacity} points)")]
    StrokeFull { capacity: usize },
    #[error("stroke history is full ({capacity} strokes)")]
    HistoryFull { capacity: usize },
}

/// The live stroke plus every finalized stroke of a document.
///
/// Finalized points are copied into an append-only arena. Clearing the
/// history drops the strokes but leaves their points in the arena.
///
/// A live stroke whose finalize hit `HistoryFull` stays live but closed: it
/// takes no more points until a later finalize succeeds, so the next gesture
/// never extends it.
#[derive(Debug)]
pub struct StrokeHistory {
    in_progress: Vec<V2l>,
    awaiting_room: bool,
    strokes: Vec<Stroke>,
    points: PointArena,
    max_stroke_points: usize,
    max_stored_strokes: usize,
}

impl Default for StrokeHistory {
    fn default() -> Self {
        Self::with_capacities(MAX_STROKE_POINTS, MAX_STORED_STROKES)
    }
}

impl StrokeHistory {
    pub fn with_capacities(max_stroke_points: usize, max_stored_strokes: usize) -> Self {
        Self {
            in_progress: Vec::with_capacity(max_stroke_points),
            awaiting_room: false,
            strokes: Vec::with_capacity(max_stored_strokes),
            points: PointArena::default(),
            max_stroke_points,
            max_stored_strokes,
        }
    }

    pub fn max_stroke_points(&self) -> usize {
        self.max_stroke_points
    }

    pub fn max_stored_strokes(&self) -> usize {
        self.max_stored_strokes
    }

    /// Appends to the live stroke and returns its new length.
    pub fn push_point(&mut self, canvas_point: V2l) -> Result<usize, HistoryError> {
        if self.awaiting_room {
            return Err(HistoryError::HistoryFull {
                capacity: self.max_stored_strokes,
            });
        }
        if self.in_progress.len() >= self.max_stroke_points {
            return Err(HistoryError::StrokeFull {
                capacity: self.max_stroke_points,
            });
        }
        self.in_progress.push(canvas_point);
        Ok(self.in_progress.len())
    }

    pub fn in_progress_points(&self) -> &[V2l] {
        &self.in_progress
    }

    pub fn has_in_progress(&self) -> bool {
        !self.in_progress.is_empty()
    }

    /// True while the live stroke is finished but has no slot in the history.
    pub fn is_awaiting_room(&self) -> bool {
        self.awaiting_room
    }

    /// Moves the live stroke into the history.
    ///
    /// Returns `Ok(None)` when there is nothing to finalize. On
    /// `HistoryFull` the live stroke is kept as is and closed to new points.
    pub fn finalize(&mut self, brush: Brush) -> Result<Option<Stroke>, HistoryError> {
        if self.in_progress.is_empty() {
            return Ok(None);
        }
        if self.strokes.len() >= self.max_stored_strokes {
            self.awaiting_room = true;
            return Err(HistoryError::HistoryFull {
                capacity: self.max_stored_strokes,
            });
        }
        let span = self.points.push_slice(&self.in_progress);
        let stroke = Stroke::new(span, brush);
        self.strokes.push(stroke);
        // Storage is reused by the next stroke.
        self.in_progress.clear();
        self.awaiting_room = false;
        tracing::debug!(
            "[document] stroke finalized points={} stored={}",
            stroke.num_points(),
            self.strokes.len()
        );
        Ok(Some(stroke))
    }

    /// Forgets every finalized stroke and returns how many there were.
    pub fn clear_strokes(&mut self) -> usize {
        let cleared = self.strokes.len();
        self.strokes.clear();
        cleared
    }

    pub fn stored_strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn num_stored_strokes(&self) -> usize {
        self.strokes.len()
    }

    pub fn stroke_points(&self, stroke: &Stroke) -> &[V2l] {
        self.points.get(stroke.points()).unwrap_or(&[])
    }

    pub fn stroke_bounds(&self, stroke: &Stroke) -> Option<Rectl> {
        Rectl::bounding(self.stroke_points(stroke))
    }

    pub fn iter_strokes(&self) -> impl Iterator<Item = (Brush, &[V2l])> {
        self.strokes
            .iter()
            .map(|stroke| (stroke.brush(), self.stroke_points(stroke)))
    }

    /// Points held by the arena, reachable or not.
    pub fn arena_point_count(&self) -> usize {
        self.points.len()
    }

    /// Drops everything including arena storage.
    pub fn teardown(&mut self) {
        self.in_progress.clear();
        self.awaiting_room = false;
        self.strokes.clear();
        self.points.clear();
    }
}
