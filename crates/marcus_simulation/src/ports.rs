//! Ports — capabilities которые предоставляет host engine
//!
//! ECS не владеет физическим миром и viewport'ом. Host ставит реализации
//! как resources (`WorldRaycast`, `ScreenProjection`). Если resource нет —
//! зависимые вычисления пропускаются на этот тик (не ошибка).

use bevy::prelude::*;

/// Collision channel для line trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionChannel {
    /// Пули и crosshair trace
    Visibility,
    Camera,
}

/// Ближайший blocking hit
#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    /// Точка попадания (world space)
    pub point: Vec3,
    /// ECS entity если попали в актора/предмет, который известен симуляции
    pub entity: Option<Entity>,
    /// Имя кости skeletal mesh (для headshot)
    pub bone: Option<String>,
}

impl RaycastHit {
    pub fn at(point: Vec3) -> Self {
        Self {
            point,
            entity: None,
            bone: None,
        }
    }
}

/// World ray (deprojected screen point)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl WorldRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Точка на расстоянии `distance` вдоль (нормализованного) направления
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * distance
    }
}

/// Raycast в физическом мире host engine
pub trait RaycastPort: Send + Sync {
    fn raycast(&self, start: Vec3, end: Vec3, channel: CollisionChannel) -> Option<RaycastHit>;
}

/// Screen → world deprojection (renderer/viewport host engine)
pub trait ScreenProjectionPort: Send + Sync {
    /// Размер viewport в пикселях (None — viewport ещё не создан)
    fn viewport_size(&self) -> Option<Vec2>;

    /// None — deprojection не удалась (нет player controller / камеры)
    fn deproject(&self, screen_point: Vec2) -> Option<WorldRay>;
}

/// Resource: raycast capability
#[derive(Resource)]
pub struct WorldRaycast(pub Box<dyn RaycastPort>);

impl WorldRaycast {
    pub fn new(port: impl RaycastPort + 'static) -> Self {
        Self(Box::new(port))
    }
}

/// Resource: deprojection capability
#[derive(Resource)]
pub struct ScreenProjection(pub Box<dyn ScreenProjectionPort>);

impl ScreenProjection {
    pub fn new(port: impl ScreenProjectionPort + 'static) -> Self {
        Self(Box::new(port))
    }
}

/// Порты, доступные на этом тике (borrowed из resources)
#[derive(Clone, Copy, Default)]
pub struct HostPorts<'a> {
    pub projection: Option<&'a dyn ScreenProjectionPort>,
    pub raycast: Option<&'a dyn RaycastPort>,
}

impl<'a> HostPorts<'a> {
    pub fn from_resources(projection: Option<&'a ScreenProjection>, raycast: Option<&'a WorldRaycast>) -> Self {
        Self {
            projection: projection.map(|port| port.0.as_ref()),
            raycast: raycast.map(|port| port.0.as_ref()),
        }
    }

    /// Оба порта на месте (можно считать impact point)
    pub fn targeting(&self) -> Option<(&'a dyn ScreenProjectionPort, &'a dyn RaycastPort)> {
        Some((self.projection?, self.raycast?))
    }
}

/// Raycaster без геометрии (ничего не блокирует)
pub struct EmptyWorld;

impl RaycastPort for EmptyWorld {
    fn raycast(&self, _start: Vec3, _end: Vec3, _channel: CollisionChannel) -> Option<RaycastHit> {
        None
    }
}

/// Фиксированная камера: любая точка экрана deproject'ится в один и тот же ray
///
/// Используется headless demo и тестами.
pub struct FixedCamera {
    pub viewport: Vec2,
    pub ray: WorldRay,
}

impl ScreenProjectionPort for FixedCamera {
    fn viewport_size(&self) -> Option<Vec2> {
        Some(self.viewport)
    }

    fn deproject(&self, _screen_point: Vec2) -> Option<WorldRay> {
        Some(self.ray)
    }
}
