pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Sign in</title></head>
  <body>
    <nav class="top-nav">
      <a href="/" class="brand">Acme</a>
      <a href="/help" class="nav-link">Help</a>
      <a href="/about" class="nav-link">About</a>
    </nav>
    <main id="content">
      <form id="login" action="/session">
        <label for="email">Email</label>
        <input name="email" type="email">
        <label for="password">Password</label>
        <input name="password" type="password">
        <button type="submit" class="btn primary">Sign in</button>
      </form>
      <p class="hint">Forgot your password?</p>
    </main>
  </body>
</html>
"#;

pub const LOGIN_PAGE_V2: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Sign in</title></head>
  <body>
    <nav class="top-nav">
      <a href="/" class="brand">Acme</a>
      <a href="/help" class="nav-link">Help center</a>
      <a href="/about" class="nav-link">About</a>
    </nav>
    <main id="content">
      <form id="login" action="/session">
        <label for="email">Email</label>
        <input name="email" type="email" data-testid="email-input">
        <label for="password">Password</label>
        <input name="password" type="password">
        <button type="submit" class="btn primary">Sign in</button>
      </form>
      <p class="hint">Forgot your password?</p>
      <a id="signup" href="/signup">Create account</a>
    </main>
  </body>
</html>
"#;
