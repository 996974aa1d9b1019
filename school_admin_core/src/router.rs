//! 路由表与导航守卫
//!
//! 路由表是一棵静态树，每条路由可声明 `requires_auth` 与 `role`。
//! 子路由继承父路由的元数据：任一层要求登录即要求登录，角色取最深一层的声明。
//!
//! 守卫规则按顺序判断：
//!
//! 1. 需要登录但未登录 → 跳转 [`LOGIN_PATH`]
//! 2. 声明了角色且与当前角色不同 → 跳转 [`HOME_PATH`]
//! 3. 其余放行

use crate::session::{Session, SessionStore};
use crate::types::Role;
use std::sync::Arc;
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// 路由元数据
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteMeta {
    pub fn auth() -> Self {
        Self {
            requires_auth: true,
            role: None,
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            requires_auth: false,
            role: Some(role),
        }
    }

    /// 子路由元数据叠加到父路由之上
    fn merge(self, child: RouteMeta) -> Self {
        Self {
            requires_auth: self.requires_auth || child.requires_auth,
            role: child.role.or(self.role),
        }
    }
}

/// 路由定义；子路由路径相对父路由
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

/// 路径解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: String,
    pub full_path: String,
    /// 合并后的元数据
    pub meta: RouteMeta,
}

/// 导航决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allowed,
    RedirectToLogin,
    RedirectToHome,
}

impl Navigation {
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Navigation::Allowed => None,
            Navigation::RedirectToLogin => Some(LOGIN_PATH),
            Navigation::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// 守卫规则本身，只依赖元数据和会话快照
pub fn check(meta: &RouteMeta, session: &Session) -> Navigation {
    if meta.requires_auth && !session.is_logged_in() {
        Navigation::RedirectToLogin
    } else if meta.role.is_some() && meta.role != session.role {
        Navigation::RedirectToHome
    } else {
        Navigation::Allowed
    }
}

/// 路由表
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// 管理后台的标准路由
    pub fn standard() -> Self {
        let home = Route::new("/", "home")
            .meta(RouteMeta::auth())
            .children(vec![
                // 学生
                Route::new("student/scores", "studentScores").meta(RouteMeta::role(Role::Student)),
                Route::new("student/ranking", "studentRanking").meta(RouteMeta::role(Role::Student)),
                // 教师
                Route::new("teacher/class-list", "teacherClassList").meta(RouteMeta::role(Role::Teacher)),
                Route::new("teacher/score-management", "teacherScoreManagement")
                    .meta(RouteMeta::role(Role::Teacher)),
                Route::new("teacher/statistics", "teacherStatistics").meta(RouteMeta::role(Role::Teacher)),
                // 管理员
                Route::new("admin/student-list", "adminStudentList").meta(RouteMeta::role(Role::Admin)),
                Route::new("admin/teacher-list", "adminTeacherList").meta(RouteMeta::role(Role::Admin)),
                Route::new("admin/settings", "adminSettings").meta(RouteMeta::role(Role::Admin)),
                Route::new("admin/logs", "adminLogs").meta(RouteMeta::role(Role::Admin)),
                Route::new("admin/dormitory", "adminDormitory").meta(RouteMeta::role(Role::Admin)),
                // 所有已登录用户
                Route::new("user/profile", "userProfile"),
            ]);

        Self::new(vec![
            home,
            Route::new("/about", "about"),
            Route::new(LOGIN_PATH, "login"),
            Route::new("/register", "register"),
        ])
    }

    /// 解析路径；忽略查询串、锚点和末尾的 `/`
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let target = normalize(path);
        find(&self.routes, "", RouteMeta::default(), &target)
    }

    /// 未匹配的路径没有元数据，直接放行
    pub fn guard(&self, path: &str, session: &Session) -> Navigation {
        let meta = self.resolve(path).map(|r| r.meta).unwrap_or_default();
        check(&meta, session)
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn join(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

fn find(routes: &[Route], parent: &str, inherited: RouteMeta, target: &str) -> Option<ResolvedRoute> {
    for route in routes {
        let full_path = join(parent, &route.path);
        let meta = inherited.merge(route.meta);
        if normalize(&full_path) == target {
            return Some(ResolvedRoute {
                name: route.name.clone(),
                full_path: normalize(&full_path),
                meta,
            });
        }
        if let Some(found) = find(&route.children, &full_path, meta, target) {
            return Some(found);
        }
    }
    None
}

/// 绑定会话的路由器
pub struct Router {
    table: RouteTable,
    session: Arc<SessionStore>,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        Self { table, session }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// 对一次导航做出决定
    pub fn navigate(&self, path: &str) -> Navigation {
        let decision = self.table.guard(path, &self.session.snapshot());
        debug!("Navigation to {} -> {:?}", path, decision);
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionUpdate;
    use crate::storage::MemoryStorage;

    fn session(token: &str, role: Option<Role>) -> Session {
        Session {
            token: token.to_string(),
            role,
            ..Session::default()
        }
    }

    #[test]
    fn test_check_order() {
        let logged_out = Session::default();
        let student = session("t", Some(Role::Student));

        assert_eq!(check(&RouteMeta::auth(), &logged_out), Navigation::RedirectToLogin);
        assert_eq!(check(&RouteMeta::auth(), &student), Navigation::Allowed);
        assert_eq!(check(&RouteMeta::role(Role::Admin), &student), Navigation::RedirectToHome);
        assert_eq!(check(&RouteMeta::role(Role::Student), &student), Navigation::Allowed);
        assert_eq!(check(&RouteMeta::default(), &logged_out), Navigation::Allowed);

        let both = RouteMeta {
            requires_auth: true,
            role: Some(Role::Admin),
        };
        assert_eq!(check(&both, &logged_out), Navigation::RedirectToLogin);
    }

    #[test]
    fn test_child_inherits_auth_requirement() {
        let table = RouteTable::standard();
        let resolved = table.resolve("/admin/settings").unwrap();
        assert_eq!(resolved.name, "adminSettings");
        assert!(resolved.meta.requires_auth);
        assert_eq!(resolved.meta.role, Some(Role::Admin));

        let profile = table.resolve("/user/profile/").unwrap();
        assert_eq!(profile.full_path, "/user/profile");
        assert_eq!(profile.meta, RouteMeta::auth());
    }

    #[test]
    fn test_logged_out_always_goes_to_login() {
        let table = RouteTable::standard();
        let logged_out = Session::default();
        for path in ["/", "/user/profile", "/admin/logs", "/student/scores?tab=1"] {
            let decision = table.guard(path, &logged_out);
            assert_eq!(decision, Navigation::RedirectToLogin, "path {path}");
            assert_eq!(decision.redirect_path(), Some(LOGIN_PATH));
        }
        assert_eq!(table.guard("/login", &logged_out), Navigation::Allowed);
        assert_eq!(table.guard("/register", &logged_out), Navigation::Allowed);
    }

    #[test]
    fn test_student_cannot_open_admin_pages() {
        let table = RouteTable::standard();
        let student = session("t", Some(Role::Student));
        assert_eq!(table.guard("/admin/student-list", &student), Navigation::RedirectToHome);
        assert_eq!(table.guard("/teacher/statistics", &student), Navigation::RedirectToHome);
        assert_eq!(table.guard("/student/ranking", &student), Navigation::Allowed);
        assert_eq!(table.guard("/user/profile", &student), Navigation::Allowed);
    }

    #[test]
    fn test_unknown_path_is_allowed() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/nowhere"), None);
        assert_eq!(table.guard("/nowhere", &Session::default()), Navigation::Allowed);
    }

    #[test]
    fn test_router_reads_live_session() {
        let store = Arc::new(SessionStore::load(MemoryStorage::new()).unwrap());
        let router = Router::new(RouteTable::standard(), store.clone());
        assert_eq!(router.navigate("/admin/logs"), Navigation::RedirectToLogin);

        store
            .set_user_info(SessionUpdate {
                token: Some("abc".into()),
                role: Some(Role::Admin),
                ..SessionUpdate::default()
            })
            .unwrap();
        assert_eq!(router.navigate("/admin/logs"), Navigation::Allowed);

        store.clear_user_info().unwrap();
        assert_eq!(router.navigate("/admin/logs"), Navigation::RedirectToLogin);
    }
}
