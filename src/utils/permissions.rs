use crate::error::{MouseMoveError, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{info, warn};

const UINPUT_DEVICE: &str = "/dev/uinput";

/// Проверить права доступа, необходимые для виртуального указателя
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    check_uinput_access(Path::new(UINPUT_DEVICE))?;
    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

fn check_uinput_access(uinput_device: &Path) -> Result<()> {
    if !uinput_device.exists() {
        return Err(MouseMoveError::Permission(format!(
            "{} не существует, возможно модуль uinput не загружен (sudo modprobe uinput)",
            uinput_device.display()
        )));
    }

    let metadata = fs::metadata(uinput_device).map_err(|e| {
        MouseMoveError::Permission(format!(
            "Не удалось проверить права доступа к {}: {}",
            uinput_device.display(),
            e
        ))
    })?;

    // Обычно 660 (группа input/uinput) или 666
    let mode = metadata.permissions().mode();
    if mode & 0o006 == 0 && mode & 0o060 == 0 {
        return Err(MouseMoveError::Permission(format!(
            "Нет прав доступа к {}. Добавьте пользователя в группу 'uinput' или 'input'",
            uinput_device.display()
        )));
    }

    info!("Доступ к {} подтвержден", uinput_device.display());
    Ok(())
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группы 'input' и 'uinput'");
            warn!("   и запускать приложение от имени обычного пользователя");
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

/// Получить рекомендуемые команды для настройки прав доступа
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "# Добавить пользователя в необходимые группы:".to_string(),
        "sudo usermod -a -G input,uinput $USER".to_string(),
        "".to_string(),
        "# Загрузить модуль uinput:".to_string(),
        "sudo modprobe uinput".to_string(),
        "".to_string(),
        "# Автоматическая загрузка модуля при загрузке системы:".to_string(),
        "echo 'uinput' | sudo tee /etc/modules-load.d/uinput.conf".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_commands() {
        let commands = get_setup_commands();
        assert!(!commands.is_empty());
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
        assert!(commands.iter().any(|cmd| cmd.contains("modprobe")));
    }

    #[test]
    fn test_missing_device_is_permission_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_uinput_access(&dir.path().join("uinput")).unwrap_err();
        assert!(matches!(err, MouseMoveError::Permission(_)));
    }

    #[test]
    fn test_group_writable_device_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("uinput");
        fs::write(&device, "").unwrap();
        fs::set_permissions(&device, fs::Permissions::from_mode(0o660)).unwrap();

        assert!(check_uinput_access(&device).is_ok());

        fs::set_permissions(&device, fs::Permissions::from_mode(0o600)).unwrap();
        assert!(check_uinput_access(&device).is_err());
    }
}
