//! Committed and in-progress circle values.

use mapcircle_core::HandleKind;
use mapcircle_geodesy::LngLat;

/// What a drag is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditState {
    #[default]
    Idle,
    EditingCenter(LngLat),
    EditingRadius(f64),
}

impl EditState {
    pub fn kind(&self) -> Option<HandleKind> {
        match self {
            EditState::Idle => None,
            EditState::EditingCenter(_) => Some(HandleKind::Center),
            EditState::EditingRadius(_) => Some(HandleKind::Radius),
        }
    }
}

/// Which committed values moved away from their last snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Commit {
    pub center_changed: bool,
    pub radius_changed: bool,
}

impl Commit {
    pub fn any(&self) -> bool {
        self.center_changed || self.radius_changed
    }
}

/// Center and radius of one circle.
///
/// Radii are clamped to `[min_radius, max_radius]` on every write, edit
/// values included. Snapshots hold the values last announced to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleModel {
    center: LngLat,
    radius: f64,
    edit: EditState,
    last_center: LngLat,
    last_radius: f64,
    min_radius: f64,
    max_radius: f64,
}

impl CircleModel {
    pub fn new(center: LngLat, radius: f64, min_radius: f64, max_radius: f64) -> Self {
        let radius = radius.clamp(min_radius, max_radius);
        Self {
            center,
            radius,
            edit: EditState::Idle,
            last_center: center,
            last_radius: radius,
            min_radius,
            max_radius,
        }
    }

    pub fn center(&self) -> LngLat {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// The handle being dragged, if any.
    pub fn editing(&self) -> Option<HandleKind> {
        self.edit.kind()
    }

    /// Edit center while a center drag is active, committed center otherwise.
    pub fn active_center(&self) -> LngLat {
        match self.edit {
            EditState::EditingCenter(center) => center,
            _ => self.center,
        }
    }

    /// Edit radius while a radius drag is active, committed radius otherwise.
    pub fn active_radius(&self) -> f64 {
        match self.edit {
            EditState::EditingRadius(radius) => radius,
            _ => self.radius,
        }
    }

    pub fn clamp(&self, radius: f64) -> f64 {
        radius.clamp(self.min_radius, self.max_radius)
    }

    /// Start editing `kind`, seeded from the committed value.
    ///
    /// Returns false if a drag is already active.
    pub fn begin_edit(&mut self, kind: HandleKind) -> bool {
        if self.edit != EditState::Idle {
            return false;
        }
        self.edit = match kind {
            HandleKind::Center => EditState::EditingCenter(self.center),
            HandleKind::Radius => EditState::EditingRadius(self.radius),
        };
        true
    }

    /// Returns false outside a center drag.
    pub fn update_edit_center(&mut self, center: LngLat) -> bool {
        match &mut self.edit {
            EditState::EditingCenter(c) => {
                *c = center;
                true
            }
            _ => false,
        }
    }

    /// Returns false outside a radius drag.
    pub fn update_edit_radius(&mut self, radius: f64) -> bool {
        let radius = self.clamp(radius);
        match &mut self.edit {
            EditState::EditingRadius(r) => {
                *r = radius;
                true
            }
            _ => false,
        }
    }

    /// Move the edit value into the committed value and return to idle.
    ///
    /// Snapshots of changed values are updated, so committing the same
    /// value twice reports a change once.
    pub fn commit(&mut self) -> Commit {
        match std::mem::take(&mut self.edit) {
            EditState::Idle => Commit::default(),
            EditState::EditingCenter(center) => Commit {
                center_changed: self.write_center(center),
                radius_changed: false,
            },
            EditState::EditingRadius(radius) => Commit {
                center_changed: false,
                radius_changed: self.write_radius(radius),
            },
        }
    }

    /// Drop the edit value without committing.
    pub fn cancel_edit(&mut self) -> Option<HandleKind> {
        std::mem::take(&mut self.edit).kind()
    }

    /// Set the committed center. Returns whether it differs from the snapshot.
    pub fn set_center(&mut self, center: LngLat) -> bool {
        self.write_center(center)
    }

    /// Set the committed radius, clamped. Returns whether it differs from the snapshot.
    pub fn set_radius(&mut self, radius: f64) -> bool {
        let radius = self.clamp(radius);
        self.write_radius(radius)
    }

    fn write_center(&mut self, center: LngLat) -> bool {
        self.center = center;
        let changed = center != self.last_center;
        if changed {
            self.last_center = center;
        }
        changed
    }

    fn write_radius(&mut self, radius: f64) -> bool {
        self.radius = radius;
        let changed = radius != self.last_radius;
        if changed {
            self.last_radius = radius;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn model() -> CircleModel {
        CircleModel::new(LngLat::new(-75.343, 39.984), 300.0, 10.0, 500_000.0)
    }

    #[test]
    fn test_construction_clamps() {
        let m = CircleModel::new(LngLat::default(), 1.0, 10.0, 100.0);
        assert_eq!(m.radius(), 10.0);
    }

    #[test]
    fn test_active_values_follow_edit() {
        let mut m = model();
        assert!(m.begin_edit(HandleKind::Radius));
        assert!(!m.begin_edit(HandleKind::Center));
        m.update_edit_radius(1000.0);
        assert_eq!(m.active_radius(), 1000.0);
        assert_eq!(m.radius(), 300.0);
        assert!(!m.update_edit_center(LngLat::new(0.0, 0.0)));
    }

    #[test]
    fn test_commit_reports_change_once() {
        let mut m = model();
        m.begin_edit(HandleKind::Radius);
        m.update_edit_radius(1000.0);
        let commit = m.commit();
        assert!(commit.radius_changed);
        assert!(!commit.center_changed);
        assert_eq!(m.radius(), 1000.0);
        assert_eq!(m.editing(), None);

        m.begin_edit(HandleKind::Radius);
        assert!(!m.commit().any());
    }

    #[test]
    fn test_drag_back_to_start_is_no_change() {
        let mut m = model();
        m.begin_edit(HandleKind::Center);
        m.update_edit_center(LngLat::new(-75.0, 40.0));
        m.update_edit_center(LngLat::new(-75.343, 39.984));
        assert!(!m.commit().center_changed);
    }

    #[test]
    fn test_center_change_on_single_axis() {
        let mut m = model();
        assert!(m.set_center(LngLat::new(-75.343, 40.0)));
    }

    #[test]
    fn test_cancel_keeps_committed() {
        let mut m = model();
        m.begin_edit(HandleKind::Center);
        m.update_edit_center(LngLat::new(1.0, 1.0));
        assert_eq!(m.cancel_edit(), Some(HandleKind::Center));
        assert_eq!(m.center(), LngLat::new(-75.343, 39.984));
        assert_eq!(m.cancel_edit(), None);
    }

    #[test]
    fn test_edit_radius_is_clamped() {
        let mut m = model();
        m.begin_edit(HandleKind::Radius);
        m.update_edit_radius(1.0e9);
        assert_eq!(m.active_radius(), 500_000.0);
    }

    proptest! {
        #[test]
        fn set_radius_clamps(r in -1.0e7f64..1.0e7) {
            let mut m = model();
            m.set_radius(r);
            prop_assert_eq!(m.radius(), r.clamp(10.0, 500_000.0));
        }
    }
}
