//! Тексты, которые контроллеры показывают пользователю.

pub(crate) const LOGIN_FIELDS_REQUIRED: &str = "Заполните все поля входа";
pub(crate) const LOGIN_SUCCESS: &str = "Вход выполнен";
pub(crate) const LOGIN_FAILED: &str = "Не удалось войти";
pub(crate) const INVALID_CREDENTIALS: &str = "Неверный идентификатор или пароль";
pub(crate) const LOGOUT_SUCCESS: &str = "Вы вышли из системы";
pub(crate) const LOGOUT_FAILED: &str = "Не удалось выйти";

pub(crate) const REGISTER_FIELDS_REQUIRED: &str = "Заполните все поля регистрации";
pub(crate) const PASSWORD_MISMATCH: &str = "Пароли не совпадают";
pub(crate) const REGISTER_SUCCESS: &str = "Регистрация завершена";
pub(crate) const REGISTER_FAILED: &str = "Регистрация не удалась";
pub(crate) const USER_EXISTS: &str = "Пользователь с таким ID уже существует";
pub(crate) const DATABASE_ERROR: &str = "Произошла ошибка базы данных";
pub(crate) const UNKNOWN_ERROR: &str = "Произошла неизвестная ошибка";
pub(crate) const GENERIC_ERROR: &str = "Произошла ошибка";

pub(crate) const STATUS_CHECK_FAILED: &str = "Не удалось проверить статус входа";
pub(crate) const CURRENT_USER_FAILED: &str = "Не удалось получить текущего пользователя";
pub(crate) const PROTECTED_FAILED: &str = "Нет доступа к защищённому ресурсу";

pub(crate) const LOAD_POSTS_FAILED: &str = "Не удалось загрузить посты";
pub(crate) const LOAD_POST_FAILED: &str = "Не удалось загрузить пост";

pub(crate) const POST_FIELDS_REQUIRED: &str = "Заполните заголовок, текст и автора";
pub(crate) const POST_CREATED: &str = "Пост опубликован";
pub(crate) const POST_CREATE_FAILED: &str = "Не удалось создать пост";
pub(crate) const POST_UPDATED: &str = "Пост обновлён";
pub(crate) const POST_UPDATE_FAILED: &str = "Не удалось обновить пост";
pub(crate) const POST_DELETE_CONFIRM: &str = "Удалить пост? Это действие нельзя отменить.";
pub(crate) const POST_DELETED: &str = "Пост удалён";
pub(crate) const POST_DELETE_FAILED: &str = "Не удалось удалить пост";
pub(crate) const FORM_BUSY: &str = "Сначала закройте открытую форму";
